use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use netmount::api::errors::ApiError;
use netmount::api::render::{render_summary, render_validation_failure};
use netmount::constants::DEFAULT_PROBE_TIMEOUT_MS;
use netmount::logging::LogSink;
use netmount::policy::{Policy, Verbosity};
use netmount::Netmount;

/// Mount remote servers on the local mount points declared in fstab.
///
/// Targets are read from the config file, one `name,local_path,host,port` per line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increased verbosity by showing errors.
    #[arg(short, long)]
    verbose: bool,

    /// Timeout for the reachability probe, in milliseconds.
    #[arg(short, long, default_value_t = DEFAULT_PROBE_TIMEOUT_MS)]
    timeout: u64,

    /// Kill a mount that has not finished after this many milliseconds.
    #[arg(long)]
    mount_timeout: Option<u64>,

    /// Target list (default: $XDG_CONFIG_HOME/netmount/netmount.conf).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mounted-set file.
    #[arg(long)]
    mountinfo: Option<PathBuf>,

    /// Program invoked as `<program> <local_path>`.
    #[arg(long)]
    mount_program: Option<PathBuf>,
}

impl Args {
    fn policy(&self) -> Policy {
        let mut policy = Policy::default()
            .with_verbosity(Verbosity::from(self.verbose))
            .with_probe_timeout_ms(self.timeout)
            .with_mount_timeout_ms(self.mount_timeout);
        if let Some(p) = &self.config {
            policy = policy.with_config_path(p);
        }
        if let Some(p) = &self.mountinfo {
            policy = policy.with_mountinfo_path(p);
        }
        if let Some(p) = &self.mount_program {
            policy = policy.with_mount_program(p);
        }
        policy
    }
}

fn program_name() -> String {
    std::env::args()
        .next()
        .and_then(|a| {
            PathBuf::from(a)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

fn main() -> ExitCode {
    let t0 = Instant::now();
    let args = Args::parse();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();

    let policy = args.policy();
    let verbosity = policy.verbosity;
    let api = Netmount::new(LogSink, LogSink, policy);

    let report = match api.execute() {
        Ok(r) => r,
        Err(e) => {
            let text = match &e {
                ApiError::Validation(f) => render_validation_failure(f, verbosity),
                other => other.to_string(),
            };
            println!("\n {}\n", text.trim_end());
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1));
        }
    };

    println!();
    print!("{}", api.render(&report));
    println!(
        "\n{}\n",
        render_summary(&program_name(), env!("CARGO_PKG_VERSION"), t0.elapsed())
    );
    ExitCode::SUCCESS
}
