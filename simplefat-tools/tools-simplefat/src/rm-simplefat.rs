use clap::{App, Arg};
use std::process::exit;
use simplefat::{Disc, DEFAULT_LABEL};
use simplefat_tool_lib::{confirm, image_geometry, init_logger, Handler, Manager};

fn main() {
    let arguments = App::new("rm-simplefat")
        .version("0.1.0")
        .about("This program removes files from a simplefat image.")
        .arg(
            Arg::with_name("image")
                .required(true)
                .takes_value(true)
                .help("The path of the image"),
        )
        .arg(
            Arg::with_name("file")
                .required(true)
                .takes_value(true)
                .help("The name of the file to remove"),
        )
        .arg(
            Arg::with_name("cluster-size")
                .short("c")
                .long("cluster-size")
                .takes_value(true)
                .help("The cluster size the image was formatted with. Defaults to 100."),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .takes_value(false)
                .help("Log every cluster operation."),
        )
        .get_matches();

    match init_logger(arguments.is_present("verbose")) {
        Ok(_) => (),
        Err(e) => eprintln!("Could not install the logger: {}", e),
    }

    let path = match arguments.value_of("image") {
        Some(p) => p,
        None => {
            eprintln!("An image is required.");
            exit(1);
        }
    };

    let mut manager = Manager::new();
    let mut handler = match Handler::open(path.to_string()) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    let geometry = match image_geometry(&handler, arguments.value_of("cluster-size")) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    let mut disc =
        match Disc::mount_with_geometry(&mut handler, &mut manager, geometry, DEFAULT_LABEL) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Disc opening error: {}", e);
                exit(1);
            }
        };

    let file_name = match arguments.value_of("file") {
        Some(f) => f,
        None => {
            eprintln!("A file to remove is required.");
            exit(1);
        }
    };

    match disc.lookup(file_name) {
        Ok(Some(_)) => (),
        Ok(None) => {
            eprintln!("Could not find file with name {}", file_name);
            exit(1);
        }
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            exit(1);
        }
    }

    match confirm(&format!(
        "Are you sure you wish to remove \"{}\" from the image:",
        file_name
    )) {
        Ok(true) => (),
        Ok(false) => {
            println!("Will not remove file.");
            exit(0);
        }
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    }

    let handle = match disc.open(file_name) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            exit(1);
        }
    };

    match disc.delete(&handle) {
        Ok(freed) => println!("Successfully removed file, {} cluster(s) freed!", freed),
        Err(e) => {
            eprintln!("Could not remove file due to error: {}", e);
            exit(1);
        }
    }
}
