//! guard-runner: headless operator runner for the ChurnGuard engine.
//!
//! Usage:
//!   guard-runner --db clients.db --analyze CUST-001 --employee EMP001
//!   guard-runner --db clients.db --recent 10
//!   guard-runner --db clients.db --report
//!   guard-runner --db clients.db --ipc-mode

use anyhow::Result;
use churnguard_core::{
    config::EngineConfig,
    engine::{as_percent, RetentionEngine, ServiceUpdate},
    error::GuardError,
    profile::{ContractInfo, InternetServiceInfo, PhoneServiceInfo},
    store::GuardStore,
};
use serde_json::json;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Analyze {
        customer_id: String,
        employee_id: String,
    },
    Reanalyze {
        customer_id: String,
        contract: ContractInfo,
        internet: InternetServiceInfo,
        phone: PhoneServiceInfo,
    },
    RecentActivity {
        #[serde(default)]
        limit: Option<usize>,
    },
    Report,
    Overview,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let report = args.iter().any(|a| a == "--report");
    let db = flag_value(&args, "--db").unwrap_or(":memory:");
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");

    let config = load_config(data_dir)?;
    let store = GuardStore::open(db)?;
    store.migrate()?;
    let engine = RetentionEngine::new(config, store)?;

    if ipc_mode {
        return run_ipc_loop(&engine);
    }

    if let Some(customer_id) = flag_value(&args, "--analyze") {
        let employee_id = flag_value(&args, "--employee")
            .ok_or_else(|| anyhow::anyhow!("--analyze requires --employee <id>"))?;
        match engine.analyze(customer_id, employee_id) {
            Ok(r) => {
                println!("=== ANALYSIS: {} ===", r.customer_id);
                println!("  churn risk: {:.1}% ({})", r.score, r.risk_level.as_str());
                println!("  source:     {}", if r.cache_hit { "stored analysis" } else { "new analysis" });
                for s in &r.recommendations {
                    println!("  -> {}: {}", s.title, s.description);
                }
            }
            Err(GuardError::CustomerNotFound { customer_id }) => {
                println!("Customer {customer_id} not found.");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(limit) = flag_value(&args, "--recent") {
        let limit = parse_limit("--recent", limit)?;
        println!("=== RECENT ACTIVITY ===");
        for a in engine.recent_activity(limit)? {
            println!(
                "  {} | {} ({}) consulted {}",
                a.timestamp.format("%Y-%m-%d %H:%M:%S"),
                a.employee_name,
                a.employee_role,
                a.customer_id,
            );
        }
    }

    if report {
        print_report(&engine)?;
    }

    Ok(())
}

/// Config from `{data_dir}/engine/engine_config.json`, or built-in defaults
/// when the directory has none.
fn load_config(data_dir: &str) -> Result<EngineConfig> {
    let path = format!("{data_dir}/engine/engine_config.json");
    if Path::new(&path).exists() {
        EngineConfig::load(data_dir)
    } else {
        log::warn!("{path} not found; using built-in engine defaults");
        Ok(EngineConfig::default())
    }
}

fn run_ipc_loop(engine: &RetentionEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                writeln!(stdout, "{}", json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        if matches!(cmd, IpcCommand::Quit) {
            break;
        }

        let reply = handle_command(engine, cmd)?;
        writeln!(stdout, "{reply}")?;
        stdout.flush()?;
    }
    Ok(())
}

fn handle_command(engine: &RetentionEngine, cmd: IpcCommand) -> Result<serde_json::Value> {
    let reply = match cmd {
        IpcCommand::Analyze { customer_id, employee_id } => {
            match engine.analyze(&customer_id, &employee_id) {
                Ok(report) => serde_json::to_value(report)?,
                Err(e) => return not_found_reply(e, &customer_id),
            }
        }
        IpcCommand::Reanalyze { customer_id, contract, internet, phone } => {
            let update = ServiceUpdate { contract, internet, phone };
            match engine.reanalyze(&customer_id, update) {
                Ok(p) => json!({
                    "customer_id": customer_id,
                    "probability": p,
                    "score": as_percent(p),
                }),
                Err(e) => return not_found_reply(e, &customer_id),
            }
        }
        IpcCommand::RecentActivity { limit } => {
            let limit = limit.unwrap_or(engine.config().reporting.recent_activity_limit);
            serde_json::to_value(engine.recent_activity(limit)?)?
        }
        IpcCommand::Report => serde_json::to_value(engine.executive_report()?)?,
        IpcCommand::Overview => serde_json::to_value(engine.portfolio_overview()?)?,
        IpcCommand::Quit => serde_json::Value::Null,
    };
    Ok(reply)
}

/// CustomerNotFound is answered on the wire; anything else ends the loop.
fn not_found_reply(err: GuardError, customer_id: &str) -> Result<serde_json::Value> {
    if err.is_customer_not_found() {
        Ok(json!({ "error": "customer not found", "customer_id": customer_id }))
    } else {
        Err(err.into())
    }
}

fn print_report(engine: &RetentionEngine) -> Result<()> {
    let r = engine.executive_report()?;

    println!("=== EXECUTIVE SUMMARY ===");
    println!("  customers:        {}", r.total_customers);
    println!("  monthly revenue:  ${:.2}", r.total_monthly_revenue);
    println!("  avg churn risk:   {:.1}%", r.average_churn_percent);
    println!("  high-risk:        {}", r.high_risk_count);

    println!();
    println!("=== CONTRACT MIX ===");
    for c in &r.contract_mix {
        println!("  {:<16} {}", c.label, c.count);
    }

    println!();
    println!("=== HIGH-RISK CUSTOMERS ===");
    if r.high_risk_customers.is_empty() {
        println!("  (none)");
    }
    for c in &r.high_risk_customers {
        println!(
            "  {} | tenure {:>3} mo | risk {:.1}%",
            c.customer_id,
            c.tenure,
            as_percent(c.churn_probability),
        );
    }
    Ok(())
}

fn parse_limit(flag: &str, raw: &str) -> Result<usize> {
    raw.parse()
        .map_err(|e| anyhow::anyhow!("{flag} expects a count, got '{raw}': {e}"))
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
