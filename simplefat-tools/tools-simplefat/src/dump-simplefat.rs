use clap::{App, Arg};
use std::process::exit;
use simplefat::{
    Disc, Image, DEFAULT_LABEL, IDENTITY_CLUSTER, RESERVED_CLUSTERS, ROOT_CLUSTER, TABLE_CLUSTER,
};
use simplefat_tool_lib::{image_geometry, init_logger, Handler, Manager};

fn main() {
    let arguments = App::new("dump-simplefat")
        .version("0.1.0")
        .about("This program prints the clusters of a simplefat image as hex.")
        .arg(
            Arg::with_name("image")
                .required(true)
                .takes_value(true)
                .help("The path of the image"),
        )
        .arg(
            Arg::with_name("clusters")
                .short("n")
                .long("clusters")
                .takes_value(true)
                .help("The number of data clusters to print. Defaults to all of them."),
        )
        .arg(
            Arg::with_name("skip-empty")
                .short("s")
                .long("skip-empty")
                .takes_value(false)
                .help("Do not print data clusters that only hold zeros."),
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
            eprintln!("Disc opening error: {}", e);
            exit(1);
        }
    };

    let image = match disc.image() {
        Ok(i) => i,
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            exit(1);
        }
    };

    let data_clusters = match arguments.value_of("clusters") {
        Some(n) => match n.parse::<usize>() {
            Ok(n) => n.min(geometry.data_clusters()),
            Err(_) => {
                eprintln!("Invalid number of clusters: \"{}\"", n);
                exit(1);
            }
        },
        None => geometry.data_clusters(),
    };

    let sections = [
        (IDENTITY_CLUSTER, "IDENTITY CLUSTER"),
        (TABLE_CLUSTER, "ALLOCATION TABLE CLUSTER"),
        (ROOT_CLUSTER, "ROOT DIRECTORY CLUSTER"),
    ];

    for (cluster, title) in sections.iter() {
        print_cluster(&image, *cluster, title);
    }

    let first = RESERVED_CLUSTERS as usize;

    for cluster in first..first + data_clusters {
        let cluster = cluster as u8;

        if arguments.is_present("skip-empty") {
            match image.is_cluster_empty(cluster) {
                Ok(true) => continue,
                _ => (),
            }
        }

        print_cluster(&image, cluster, &format!("FILE CLUSTER {}", cluster));
    }
}

fn print_cluster(image: &Image, cluster: u8, title: &str) {
    println!("########## {} ##########", title);

    match image.cluster(cluster) {
        Ok(bytes) => println!("{}", hex::encode(bytes)),
        Err(e) => eprintln!("Could not read cluster {}: {}", cluster, e),
    }
}
