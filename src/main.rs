use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use log::info;

use arith_reach::report::{RecordWriter, Summary};
use arith_reach::search::{Search, SearchConfig};
use arith_reach::space::search_space_size;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Legacy toggle: `yes` is the same as `--write-output`.
    #[arg(value_name = "yes|no")]
    toggle: Option<String>,

    /// Values are drawn from the pool `1..=POOL`.
    #[arg(long, value_name = "INT", default_value = "25", value_parser = clap::value_parser!(u16).range(1..))]
    pool: u16,

    /// Number of values per combination.
    #[arg(long, value_name = "INT", default_value = "5", value_parser = clap::value_parser!(u8).range(1..=8))]
    choose: u8,

    /// Targets are `0..MAX`.
    #[arg(long, value_name = "INT", default_value = "100", value_parser = clap::value_parser!(u32).range(1..))]
    max: u32,

    /// Write `succeeded.txt` and `failed.txt` with per-combination records.
    #[arg(long)]
    write_output: bool,

    /// Directory for the record files.
    #[arg(long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = if args.verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let write_output = args.write_output || args.toggle.as_deref() == Some("yes");
    if u16::from(args.choose) > args.pool {
        color_eyre::eyre::bail!("cannot choose {} values from a pool of {}", args.choose, args.pool);
    }
    let config = SearchConfig::new(args.pool as usize, args.choose as usize, args.max as usize)
        .with_witnesses(write_output);
    info!("config = {:?}", config);
    info!(
        "Evaluating {} expressions",
        search_space_size(config.pool_size as u64, config.choose as u64)
    );

    let search = Search::new(config);
    info!("Enumerated {} tree shapes", search.shapes().len());

    let report = if write_output {
        let open = |name: &str| -> color_eyre::Result<BufWriter<File>> {
            let path = args.output_dir.join(name);
            let file = File::create(&path).wrap_err_with(|| format!("Failed to create {}", path.display()))?;
            Ok(BufWriter::new(file))
        };
        let mut writer = RecordWriter::new(open("succeeded.txt")?, open("failed.txt")?);
        let report = search.try_for_each(|outcome| writer.write(outcome))?;
        writer.flush()?;
        report
    } else {
        search.run()
    };

    info!("stats = {:?}", report.stats);
    print!("{}", Summary(&report.tally));

    let time_total = time_total.elapsed();
    info!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
