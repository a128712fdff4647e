use clap::{App, Arg};
use log::{error, info};
use std::process::exit;
use simplefat::{Disc, FatError, FileHandle};
use simplefat_tool_lib::{
    geometry_from_arguments, init_logger, u64_to_sized_string, Handler, Manager, ToolError,
};

/// Logs the outcome of one step. A failed step is reported and the run carries on.
fn report<T>(step: &str, result: Result<T, FatError<ToolError>>) -> Option<T> {
    return match result {
        Ok(v) => {
            info!("ok      {}", step);
            Some(v)
        }
        Err(e) => {
            error!("failed  {}: {}", step, e);
            None
        }
    };
}

fn pattern(seed: u8, length: usize) -> Vec<u8> {
    return (0..length).map(|i| b'a' + ((i + seed as usize) % 26) as u8).collect();
}

fn write_file(disc: &mut Disc<ToolError>, name: &str, data: &[u8]) -> Option<FileHandle> {
    let mut handle = report(&format!("open \"{}\"", name), disc.open(name))?;
    report(
        &format!("write {} bytes to \"{}\"", data.len(), name),
        disc.write(&mut handle, data),
    );

    return Some(handle);
}

fn main() {
    let arguments = App::new("sim-simplefat")
        .version("0.1.0")
        .about("This program runs a sequence of file operations against a fresh simplefat image.")
        .arg(
            Arg::with_name("image")
                .required(false)
                .takes_value(true)
                .default_value("simplefat.img")
                .help("The path of the image to create"),
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

    let mut manager = Manager::new();
    let mut handler = Handler::new(path.to_string());

    let mut disc =
        match Disc::format(&mut handler, &mut manager, geometry, simplefat::DEFAULT_LABEL) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Could not format image: {}", e);
                exit(1);
            }
        };

    let cluster_size = geometry.cluster_size();

    if let Some(mut a) = write_file(&mut disc, "a", b"The first file fits in one cluster.") {
        report(
            "append to \"a\" past its first cluster",
            disc.append(&mut a, &pattern(0, cluster_size * 2)),
        );
    }

    let b = write_file(&mut disc, "b", &pattern(1, cluster_size * 2 + cluster_size / 2));

    if let Some(mut c) = report("open \"c\"", disc.open("c")) {
        for _ in 0..3 {
            report(
                "append a chunk to \"c\"",
                disc.append(&mut c, &pattern(2, cluster_size + cluster_size / 5)),
            );
        }

        report("close \"c\"", disc.close(c));
    }

    if let Some(b) = b {
        report("delete \"b\"", disc.delete(&b));
    }

    write_file(&mut disc, "d", &pattern(3, cluster_size * 4));

    // Asks for more than the whole disc: the write stops when the clusters run out.
    write_file(&mut disc, "e", &pattern(4, geometry.disc_size()));
    write_file(&mut disc, "f", b"Written after the disc filled up.");

    let entries = match disc.list_files() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            exit(1);
        }
    };

    println!();
    for entry in entries.iter() {
        let chain = match disc.chain(entry) {
            Ok(c) => format!("{:?}", c),
            Err(e) => format!("<{}>", e),
        };

        println!("{}  {:>3} cluster(s)  {}", entry.name(), entry.length(), chain);
    }

    match disc.disc_info() {
        Ok(info) => println!(
            "\n{} file(s), {} of {} data clusters free ({}).",
            info.number_of_files(),
            info.free_cluster_count(),
            info.data_cluster_count(),
            u64_to_sized_string(info.free_space())
        ),
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            exit(1);
        }
    }
}
