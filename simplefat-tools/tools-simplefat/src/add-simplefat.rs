use clap::{App, Arg};
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::process::exit;
use simplefat::{Disc, DEFAULT_LABEL};
use simplefat_tool_lib::{confirm, image_geometry, init_logger, Handler, Manager};

const BUFFER_SIZE: usize = 512;

fn main() {
    let arguments = App::new("add-simplefat")
        .version("0.1.0")
        .about("This program adds files to a simplefat image.")
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
                .help("The path of the file to add"),
        )
        .arg(
            Arg::with_name("name")
                .short("n")
                .long("name")
                .takes_value(true)
                .help("The one character name of the file in the image. Defaults to the first character of the file name."),
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

    let file_path = match arguments.value_of("file") {
        Some(f) => f.to_string(),
        None => {
            eprintln!("A file to add is required.");
            exit(1);
        }
    };

    let name = match arguments.value_of("name") {
        Some(n) => n.to_string(),
        None => match Path::new(&file_path)
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.chars().next())
        {
            Some(c) => c.to_string(),
            None => {
                eprintln!("Could not determine a file name to use for the image.");
                exit(1);
            }
        },
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

    match disc.lookup(&name) {
        Ok(Some(_)) => match confirm(&format!(
            "\"{}\" already exists in the image. Are you sure you wish to replace it:",
            name
        )) {
            Ok(true) => (),
            Ok(false) => {
                println!("Will not add file.");
                exit(0);
            }
            Err(e) => {
                eprintln!("{}", e);
                exit(1);
            }
        },
        Ok(None) => (),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }

    let mut file = match File::open(&file_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Could not open file due to error: {}", e);
            exit(1);
        }
    };

    let mut handle = match disc.open(&name) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut total = 0;
    let mut first = true;

    loop {
        let amount_read = match file.read(&mut buffer) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error while reading: {}", e);
                exit(1);
            }
        };

        // The first chunk replaces whatever the file held, even when the host file is empty.
        if amount_read == 0 && !first {
            break;
        }

        let result = if first {
            disc.write(&mut handle, &buffer[..amount_read])
        } else {
            disc.append(&mut handle, &buffer[..amount_read])
        };

        match result {
            Ok(n) => {
                total += n;
                debug!(
                    "\"{}\": {} bytes stored, chain of {} cluster(s)",
                    name,
                    total,
                    handle.size()
                );
            }
            Err(e) => {
                eprintln!("Error after {} bytes: {}", total, e);
                exit(1);
            }
        }

        if amount_read == 0 {
            break;
        }

        first = false;
    }

    match disc.close(handle) {
        Ok(_) => (),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }

    println!("Successfully added {} bytes as \"{}\"!", total, name);
}
