use crate::{
    checklist::{ChecklistTemplate, ItemResult},
    config::Config,
    job::JobRecord,
    progress::ProgressStore,
    report,
    report_kind::{self, parse_job_type},
    util::{ensure_dir, now_rfc3339},
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "jobcert")]
#[command(about = "Deterministic job checklist and certificate report tracker")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./jobcert.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve which report kind a job type maps to.
    Resolve {
        #[arg(long)]
        job_type: Option<String>,
    },
    /// Create a job from a checklist template.
    New {
        #[arg(long)]
        template: PathBuf,
        #[arg(long)]
        client: String,
        #[arg(long)]
        job_type: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show checklist completion for a job.
    Status {
        #[arg(long)]
        job: PathBuf,
    },
    /// Record one checklist item result (pending/pass/fail/clear).
    Set {
        #[arg(long)]
        job: PathBuf,
        #[arg(long)]
        item: String,
        #[arg(long)]
        result: String,
    },
    /// Assemble the report summary for a job.
    Report {
        #[arg(long)]
        job: PathBuf,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg_path = resolve_config_path(args.config.as_deref())?;
    let cfg = Config::load(&cfg_path)?;

    match &args.cmd {
        Command::Resolve { job_type } => {
            let _guard = init_logging(&args, &cfg, resolve_log_path(&cfg, None).as_deref())?;
            resolve(job_type.as_deref())
        }
        Command::New {
            template,
            client,
            job_type,
            out,
        } => {
            let _guard = init_logging(&args, &cfg, resolve_log_path(&cfg, None).as_deref())?;
            new_job(&cfg, template, client, job_type.as_deref(), out.as_deref())
        }
        Command::Status { job } => {
            let _guard = init_logging(&args, &cfg, resolve_log_path(&cfg, None).as_deref())?;
            status(job)
        }
        Command::Set { job, item, result } => {
            let _guard = init_logging(&args, &cfg, resolve_log_path(&cfg, None).as_deref())?;
            set_result(job, item, result)
        }
        Command::Report { job, out_dir } => run_report(&args, &cfg, job, out_dir.as_deref()),
    }
}

fn resolve_config_path(user: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = user {
        return Ok(p.to_path_buf());
    }
    let default = PathBuf::from("jobcert.toml");
    if default.exists() {
        Ok(default)
    } else {
        Ok(PathBuf::from("jobcert.example.toml"))
    }
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(true).boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn parse_job_type_lenient(tag: Option<&str>) -> Option<crate::report_kind::JobType> {
    let tag = tag?;
    let parsed = parse_job_type(tag);
    if parsed.is_none() {
        warn!("unrecognized job type {tag:?}; falling back to general works");
    }
    parsed
}

fn resolve(job_type: Option<&str>) -> Result<()> {
    let parsed = parse_job_type_lenient(job_type);
    let kind = report_kind::resolve(parsed);
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "job_type": parsed,
            "report_kind": kind,
        }))?
    );
    Ok(())
}

fn new_job(
    cfg: &Config,
    template: &Path,
    client: &str,
    job_type: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let tpl = ChecklistTemplate::load(template)?;
    let job = JobRecord::create(&tpl, client, parse_job_type_lenient(job_type));

    let out_path = out
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("job-{}.json", job.id)));
    job.save(&out_path)?;

    info!(
        "created job id={} client={} items={}",
        job.id,
        job.client,
        job.items.len()
    );

    if cfg.global.print_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "job_id": job.id,
                "job_file": out_path,
                "items": job.items.len(),
            }))?
        );
    }
    Ok(())
}

fn status(job_path: &Path) -> Result<()> {
    let job = JobRecord::load(job_path)?;
    let mut store = ProgressStore::new();
    store.load_snapshot(job.snapshot());

    let total = job.items.len();
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "job_id": job.id,
            "total": total,
            "completed": store.completed(),
            "completion_pct": store.completion_ratio(total),
            "items": job.items.iter().map(|it| {
                serde_json::json!({
                    "id": it.id,
                    "label": it.label,
                    "result": it.result,
                })
            }).collect::<Vec<_>>(),
        }))?
    );
    Ok(())
}

fn set_result(job_path: &Path, item_id: &str, result: &str) -> Result<()> {
    let status = parse_result_arg(result)?;

    let mut job = JobRecord::load(job_path)?;
    let mut store = ProgressStore::new();
    store.load_snapshot(job.snapshot());

    let Some(item) = job.item_mut(item_id) else {
        return Err(anyhow!("no checklist item with id {item_id:?}"));
    };

    let changed = store.set_status(item_id, status);
    if changed {
        // Clearing a result leaves the persisted row pending.
        item.result = status.unwrap_or(ItemResult::Pending);
        job.save(job_path)?;
        info!("item {item_id} set to {result}");
    } else {
        info!("item {item_id} already {result}; nothing written");
    }

    let total = job.items.len();
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "changed": changed,
            "completion_pct": store.completion_ratio(total),
        }))?
    );
    Ok(())
}

fn parse_result_arg(s: &str) -> Result<Option<ItemResult>> {
    match s {
        "clear" => Ok(None),
        "pending" => Ok(Some(ItemResult::Pending)),
        "pass" => Ok(Some(ItemResult::Pass)),
        "fail" => Ok(Some(ItemResult::Fail)),
        other => Err(anyhow!(
            "invalid result {other:?}; expected pending, pass, fail, or clear"
        )),
    }
}

fn run_report(args: &Args, cfg: &Config, job_path: &Path, out_override: Option<&Path>) -> Result<()> {
    let job = JobRecord::load(job_path)?;

    let out_root = out_override
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.paths.out_dir));
    let job_dir = out_root.join(&job.id);
    ensure_dir(&job_dir)?;

    let log_path = resolve_log_path(cfg, Some(&job_dir));
    let _guard = init_logging(args, cfg, log_path.as_deref())?;

    info!("job_id={} out={}", job.id, job_dir.display());

    if cfg.debug.dump_effective_config {
        let raw = toml::to_string(cfg).unwrap_or_default();
        std::fs::write(job_dir.join("effective-config.toml"), raw)?;
    }

    let mut store = ProgressStore::new();
    store.load_snapshot(job.snapshot());

    let started = now_rfc3339();
    let summary = report::assemble(cfg, &job, &store)?;

    info!(
        "report kind={:?} completed={}/{} pct={}",
        summary.report_kind, summary.completed_items, summary.total_items, summary.completion_pct
    );

    if cfg.output.write_report_json {
        std::fs::write(
            job_dir.join(&cfg.output.report_filename),
            serde_json::to_string_pretty(&summary)?,
        )?;
    }

    if cfg.output.write_index_json {
        let index = serde_json::json!({
            "job_id": job.id,
            "started": started,
            "finished": now_rfc3339(),
            "report": cfg.output.report_filename,
        });
        std::fs::write(
            job_dir.join("index.json"),
            serde_json::to_string_pretty(&index)?,
        )?;
    }

    if cfg.global.print_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "job_id": job.id,
                "job_dir": job_dir,
                "report_kind": summary.report_kind,
                "completion_pct": summary.completion_pct,
                "status": "ok"
            }))?
        );
    }

    Ok(())
}

fn resolve_log_path(cfg: &Config, job_dir: Option<&Path>) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    if let Some(job_dir) = job_dir {
        return Some(job_dir.join("jobcert.log"));
    }

    Some(PathBuf::from(&cfg.paths.out_dir).join("jobcert.log"))
}
