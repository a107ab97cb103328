use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use u_cpu_sched::request::{schedule_response, ScheduleQuery};
use u_cpu_sched::scheduler::{schedule, Algorithm, PlanMetrics, SchedulerParams};
use u_cpu_sched::store::{NewTask, TaskStore};
use u_cpu_sched::workload::WorkloadGenerator;

#[derive(Parser)]
#[command(name = "u-cpu-sched")]
#[command(about = "CPU scheduling simulator (priority, FCFS, SJF, round-robin)")]
struct Cli {
    /// Log engine decisions at debug level (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule the pending tasks and print the Gantt response as JSON
    Schedule {
        /// priority | fcfs | sjf | round_robin (unknown values run as priority)
        #[arg(default_value = "priority")]
        algorithm: String,
        #[command(flatten)]
        source: TaskSource,
        /// Round-robin time slice
        #[arg(short, long, env = "U_CPU_SCHED_QUANTUM")]
        quantum: Option<String>,
        /// Pretty-print the JSON
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Run every algorithm and print one metrics line each
    Compare {
        #[command(flatten)]
        source: TaskSource,
        /// Round-robin time slice
        #[arg(short, long, env = "U_CPU_SCHED_QUANTUM")]
        quantum: Option<String>,
    },
}

#[derive(Args)]
struct TaskSource {
    /// JSON array of {name, priority?, duration?, arrival_time?}
    #[arg(short, long, conflicts_with = "random")]
    tasks: Option<PathBuf>,
    /// Generate this many random tasks instead of reading a file
    #[arg(short, long)]
    random: Option<usize>,
    /// Seed for --random
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Schedule {
            algorithm,
            source,
            quantum,
            pretty,
        } => {
            let query = ScheduleQuery::parse(&algorithm, quantum.as_deref())?;
            let store = load_store(&source)?;
            info!(algorithm = %query.algorithm, tasks = store.len(), "scheduling");

            let response = schedule_response(&store, &query);
            let json = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            println!("{json}");
        }
        Commands::Compare { source, quantum } => {
            let params = SchedulerParams::parse_quantum(quantum.as_deref())?;
            let store = load_store(&source)?;
            let pending = store.pending();

            for algorithm in Algorithm::ALL {
                let plan = schedule(&pending, algorithm, &params);
                println!("{}", format_metrics(&PlanMetrics::calculate(&plan)));
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` wins when it holds valid directives. Otherwise the crate
/// logs at info, or debug with `--verbose`.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(format!("u_cpu_sched={default_level}")))
}

fn load_store(source: &TaskSource) -> Result<TaskStore> {
    match (&source.tasks, source.random) {
        (Some(path), _) => load_task_file(path),
        (None, Some(count)) => {
            let mut store = TaskStore::new();
            for task in WorkloadGenerator::new(count).with_seed(source.seed).generate() {
                store.create(
                    NewTask::new(task.name)
                        .with_priority(task.priority)
                        .with_duration(task.duration)
                        .with_arrival_time(task.arrival_time),
                )?;
            }
            Ok(store)
        }
        (None, None) => bail!("either --tasks <FILE> or --random <N> is required"),
    }
}

fn load_task_file(path: &Path) -> Result<TaskStore> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read task file {}", path.display()))?;
    let tasks: Vec<NewTask> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse task file {}", path.display()))?;

    let mut store = TaskStore::new();
    for (i, task) in tasks.into_iter().enumerate() {
        store
            .create(task)
            .with_context(|| format!("Task #{i} in {}", path.display()))?;
    }
    Ok(store)
}

fn format_metrics(m: &PlanMetrics) -> String {
    format!(
        "{:<12} makespan={:<4} util={:.2} switches={:<3} avg_wait={:.2} avg_turnaround={:.2} avg_response={:.2}",
        m.algorithm.key(),
        m.makespan,
        m.cpu_utilization,
        m.context_switches,
        m.avg_waiting,
        m.avg_turnaround,
        m.avg_response,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_tasks(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_log_filter_defaults() {
        assert_eq!(log_filter(None, false).to_string(), "u_cpu_sched=info");
        assert_eq!(log_filter(None, true).to_string(), "u_cpu_sched=debug");
        assert_eq!(log_filter(Some("  "), false).to_string(), "u_cpu_sched=info");
    }

    #[test]
    fn test_log_filter_rust_log_can_raise_level() {
        assert_eq!(
            log_filter(Some("u_cpu_sched=debug"), false).to_string(),
            "u_cpu_sched=debug"
        );
        assert_eq!(log_filter(Some("debug"), false).to_string(), "debug");
    }

    #[test]
    fn test_load_task_file() {
        let file = write_tasks(
            r#"[{"name": "A", "priority": 2, "duration": 5},
                {"name": "B", "priority": 1, "duration": 2, "arrival_time": 1}]"#,
        );
        let store = load_task_file(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.pending()[1].arrival_time, 1);
    }

    #[test]
    fn test_load_task_file_rejects_bad_task() {
        let file = write_tasks(r#"[{"name": "A", "duration": 0}]"#);
        let err = load_task_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("duration must be at least 1"));
    }

    #[test]
    fn test_huge_duration_schedules_without_overflow() {
        let file = write_tasks(
            r#"[{"name": "big", "duration": 9223372036854775807},
                {"name": "small", "priority": 2, "duration": 1}]"#,
        );
        let store = load_task_file(file.path()).unwrap();
        let query = ScheduleQuery::parse("priority", None).unwrap();
        let response = schedule_response(&store, &query);
        assert_eq!(response.gantt_data.total_time, i64::MAX);
    }

    #[test]
    fn test_load_task_file_missing() {
        let err = load_task_file(Path::new("/nonexistent/tasks.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read task file"));
    }

    #[test]
    fn test_load_random_source() {
        let source = TaskSource {
            tasks: None,
            random: Some(4),
            seed: 1,
        };
        let store = load_store(&source).unwrap();
        assert_eq!(store.pending().len(), 4);
    }

    #[test]
    fn test_format_metrics() {
        let store = load_task_file(
            write_tasks(r#"[{"name": "A", "duration": 3}]"#).path(),
        )
        .unwrap();
        let pending = store.pending();
        let plan = schedule(&pending, Algorithm::Fcfs, &Default::default());
        let line = format_metrics(&PlanMetrics::calculate(&plan));
        assert!(line.starts_with("fcfs"));
        assert!(line.contains("makespan=3"));
        assert!(line.contains("util=1.00"));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "u-cpu-sched",
            "schedule",
            "round_robin",
            "--random",
            "3",
            "--quantum",
            "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Schedule {
                algorithm, quantum, ..
            } => {
                assert_eq!(algorithm, "round_robin");
                assert_eq!(quantum.as_deref(), Some("4"));
            }
            Commands::Compare { .. } => panic!("expected schedule"),
        }
    }
}
