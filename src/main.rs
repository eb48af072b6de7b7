use std::net::IpAddr;
use std::path::Path;

use clap::{Arg, Command};
use log::{info, warn};

use capscope::{
    capture::{load_packets, TsharkCaptureSource},
    classify::Classifier,
    storage::{index_packets, ElasticIndexer, KibanaProvisioner},
    CapscopeError, Config, Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let matches = Command::new("capscope")
        .version("0.1.0")
        .about("Classifies captured traffic against a target address and indexes it for dashboarding")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("PATH")
                .help("Packet capture file to analyze")
                .required(true),
        )
        .arg(
            Arg::new("target")
                .short('a')
                .long("target")
                .value_name("IP")
                .help("Target IP address whose traffic is classified")
                .required(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config/default.json"),
        )
        .get_matches();

    let capture_path = matches.get_one::<String>("file").unwrap();
    let target_address: IpAddr = matches
        .get_one::<String>("target")
        .unwrap()
        .parse()
        .map_err(|_| CapscopeError::Parse("Invalid target IP address".to_string()))?;
    let config_path = matches.get_one::<String>("config").unwrap();

    let config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        info!("Config file not found, using defaults");
        Config::default()
    };

    let source = TsharkCaptureSource::new(&config.capture.tshark_binary);
    let mut packets = load_packets(&source, Path::new(capture_path))?;
    info!("Loaded {} packets", packets.len());

    let classifier = Classifier::from_lookup_files(
        Path::new(&config.classification.ads_hosts_path),
        Path::new(&config.classification.assets_hosts_path),
    )?;
    classifier.classify(&mut packets, target_address);

    let indexer = ElasticIndexer::new(&config.storage.elasticsearch_url, &config.storage.index);
    index_packets(&indexer, &packets).await?;

    if config.dashboard.enabled {
        let provisioner =
            KibanaProvisioner::new(&config.dashboard.kibana_url, &config.dashboard.space);
        let bundle_path = Path::new(&config.dashboard.bundle_path);
        if let Err(e) = provisioner.provision(bundle_path).await {
            warn!("Dashboard provisioning failed, continuing: {}", e);
        }
    }

    println!("Done. Check {}", config.dashboard_url());

    Ok(())
}
