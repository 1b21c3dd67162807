#[macro_use]
extern crate tracing;

use anyhow::Result;
use serde_json::json;
use std::{fs, path::PathBuf};
use structopt::StructOpt;
use xbridge::{
    bridge::{relay::relay, traits::SystemClock},
    utils::{init_tracing_subscriber, load_relay_params_from_file, Time},
    SimStore,
};

#[derive(StructOpt, Debug)]
struct Opt {
    /// store path, should be a directory
    #[structopt(short, long, parse(from_os_str))]
    store: PathBuf,

    /// relay params input, should be a JSON file
    #[structopt(short, long, parse(from_os_str))]
    params: PathBuf,

    /// result path, should be a file; print to stdout when not given
    #[structopt(short, long, parse(from_os_str))]
    result: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing_subscriber("info")?;
    let opts = Opt::from_args();

    let mut store = SimStore::open(&opts.store)?;
    let params = load_relay_params_from_file(&opts.params)?;

    let timer = howlong::ProcessCPUTimer::new();
    let outcome = relay(
        &mut store,
        &SystemClock,
        &params.message,
        &params.application,
        &params.consensus,
        &params.proof,
    );
    let time = Time::from(timer.elapsed());

    let res = match &outcome {
        Ok(relayed) => {
            info!("message {} relayed", relayed.message_id);
            json!({
                "ok": true,
                "relayed": relayed,
                "time": time,
            })
        }
        Err(err) => {
            warn!("relay rejected: {}", err);
            json!({
                "ok": false,
                "error": err.to_string(),
                "time": time,
            })
        }
    };
    let s = serde_json::to_string_pretty(&res)?;
    match &opts.result {
        Some(path) => fs::write(path, &s)?,
        None => println!("{}", s),
    }

    outcome?;
    Ok(())
}
