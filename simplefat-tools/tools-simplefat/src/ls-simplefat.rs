use clap::{App, Arg};
use std::process::exit;
use simplefat::{Disc, DEFAULT_LABEL};
use simplefat_tool_lib::{image_geometry, init_logger, u64_to_sized_string, Handler, Manager};

const SPACER: &str = "    ";

fn main() {
    let arguments = App::new("ls-simplefat")
        .version("0.1.0")
        .about("This program lists files in a simplefat image.")
        .arg(
            Arg::with_name("image")
                .required(true)
                .takes_value(true)
                .help("The path of the image"),
        )
        .arg(
            Arg::with_name("list")
                .short("l")
                .required(false)
                .takes_value(false)
                .help("List the files with their size and cluster chain."),
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

    let disc = match Disc::mount_with_geometry(&mut handler, &mut manager, geometry, DEFAULT_LABEL)
    {
        Ok(d) => d,
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            exit(1);
        }
    };

    let entries = match disc.list_files() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            exit(1);
        }
    };

    if entries.len() == 0 {
        println!("The image holds no files.");
        exit(0);
    }

    if arguments.is_present("list") {
        for entry in entries.iter() {
            let chain = match disc.chain(entry) {
                Ok(c) => c
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<String>>()
                    .join(" -> "),
                Err(e) => format!("<{}>", e),
            };

            println!(
                "{:<8}{}{:<4}{}{}{}{}",
                u64_to_sized_string(entry.length() as u64 * geometry.cluster_size() as u64),
                SPACER,
                entry.length(),
                SPACER,
                entry.name(),
                SPACER,
                chain
            );
        }
    } else {
        for i in 0..entries.len() {
            if (i + 1) % 8 == 0 {
                println!("{}", entries[i].name());
            } else {
                print!("{}{}", entries[i].name(), SPACER);
            }
        }

        if entries.len() % 8 != 0 {
            println!();
        }
    }
}
