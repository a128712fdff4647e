use clap::{App, Arg};
use std::process::exit;
use simplefat::{Disc, DEFAULT_LABEL};
use simplefat_tool_lib::{image_geometry, init_logger, Handler, Manager};

const SEPARATOR: &str = "  ";

fn main() {
    let arguments = App::new("read-simplefat")
        .version("0.1.0")
        .about("This program reads files from a simplefat image.")
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
                .help("The name of the file to read"),
        )
        .arg(
            Arg::with_name("raw")
                .short("r")
                .long("raw")
                .takes_value(false)
                .help("Print raw hex contents."),
        )
        .arg(
            Arg::with_name("hide_header")
                .long("hide-header")
                .takes_value(false)
                .requires("raw")
                .help("Hide the header when printing raw contents."),
        )
        .arg(
            Arg::with_name("no_formatting")
                .long("no-format")
                .takes_value(false)
                .requires("raw")
                .requires("hide_header")
                .help("Disable any formatting of raw output."),
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
            eprintln!("A file name is required to read.");
            exit(1);
        }
    };

    // Opening a missing name would create it.
    match disc.lookup(file_name) {
        Ok(Some(_)) => (),
        Ok(None) => {
            eprintln!("No file exists with name \"{}\"", file_name);
            exit(1);
        }
        Err(e) => {
            eprintln!("An error occurred: {}", e);
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

    let contents = match disc.read(&handle) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("An error occurred while reading file contents: {}", e);
            exit(1);
        }
    };

    if arguments.is_present("raw") {
        if contents.len() != 0 && !arguments.is_present("hide_header") {
            for i in 0..0x10 {
                print!("{:02x}{}", i, SEPARATOR);
            }

            println!("\n");
        }

        if !arguments.is_present("no_formatting") {
            for i in 0..contents.len() {
                if (i + 1) % 0x10 == 0 {
                    println!("{:02x}", contents[i]);
                } else {
                    print!("{:02x}{}", contents[i], SEPARATOR);
                }
            }

            if contents.len() % 0x10 != 0 {
                println!();
            }
        } else {
            println!("{}", hex::encode(&contents));
        }
    } else {
        match String::from_utf8(contents) {
            Ok(s) => {
                print!("{}", s);
            }
            Err(_) => {
                eprintln!("Could not create UTF-8 text from file contents.");
                exit(1);
            }
        };
    }
}
