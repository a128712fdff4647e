use clap::{App, Arg};
use std::path::Path;
use std::process::exit;
use simplefat::{Disc, DEFAULT_LABEL};
use simplefat_tool_lib::{
    confirm, geometry_from_arguments, init_logger, u64_to_sized_string, Handler, Manager,
};

fn main() {
    let arguments = App::new("mkfs-simplefat")
        .version("0.1.0")
        .about("This program creates and formats a simplefat image.")
        .arg(
            Arg::with_name("image")
                .required(true)
                .takes_value(true)
                .help("The path of the image"),
        )
        .arg(
            Arg::with_name("size")
                .short("s")
                .long("size")
                .takes_value(true)
                .help("The size of the image, e.g. 3072 or 3KiB. Defaults to 3072 bytes."),
        )
        .arg(
            Arg::with_name("cluster-size")
                .short("c")
                .long("cluster-size")
                .takes_value(true)
                .help("The size of a cluster in bytes. Defaults to 100."),
        )
        .arg(
            Arg::with_name("label")
                .short("l")
                .long("label")
                .takes_value(true)
                .help("The ASCII label written into the first cluster."),
        )
        .arg(
            Arg::with_name("force")
                .short("f")
                .long("force")
                .takes_value(false)
                .help("Overwrite an existing image without asking."),
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

    let geometry = match geometry_from_arguments(
        arguments.value_of("size"),
        arguments.value_of("cluster-size"),
    ) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    if Path::new(path).exists() && !arguments.is_present("force") {
        match confirm(&format!(
            "\"{}\" already exists. Are you sure you wish to overwrite it:",
            path
        )) {
            Ok(true) => (),
            Ok(false) => {
                println!("Will not format image.");
                exit(0);
            }
            Err(e) => {
                eprintln!("{}", e);
                exit(1);
            }
        }
    }

    let label = arguments.value_of("label").unwrap_or(DEFAULT_LABEL);

    let mut manager = Manager::new();
    let mut handler = Handler::new(path.to_string());

    let disc = match Disc::format(&mut handler, &mut manager, geometry, label) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Could not format image: {}", e);
            exit(1);
        }
    };

    let info = match disc.disc_info() {
        Ok(i) => i,
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            exit(1);
        }
    };

    println!(
        "Formatted \"{}\": {} data clusters of {} bytes, {} free, {} directory slots.",
        info.label(),
        info.data_cluster_count(),
        info.cluster_size(),
        u64_to_sized_string(info.free_space()),
        info.free_file_slots()
    );
}
