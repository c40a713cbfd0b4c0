use clap::Parser;
use std::path::{Path, PathBuf};

use ibg_advisor::config::Config;
use ibg_advisor::index::{CandidatePool, Configuration};
use ibg_advisor::oracle::check_oracle;
use ibg_advisor::utils::logging;
use ibg_advisor::workload::{TuningSession, WorkloadFile};

#[derive(Parser)]
#[command(name = "ibg-advisor", version, about = "索引收益图调优工具")]
enum Cli {
    /// 构建索引收益图并分析索引交互
    Analyze {
        /// 工作负载文件（JSON）
        #[arg(short, long)]
        workload: PathBuf,
        /// 配置文件（TOML）
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// 交互度阈值，覆盖配置文件中的值
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// 校验工作负载中代价预言的合理性与单调性
    Check {
        /// 工作负载文件（JSON）
        #[arg(short, long)]
        workload: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let result = match cli {
        Cli::Analyze {
            workload,
            config,
            threshold,
        } => {
            let mut config = match config {
                Some(path) => Config::load(path)?,
                None => Config::default(),
            };
            if let Some(threshold) = threshold {
                config.interaction.threshold = threshold;
            }
            start_logging(&config);
            analyze(&workload, &config)
        }
        Cli::Check { workload } => {
            start_logging(&Config::default());
            check(&workload)
        }
    };

    logging::shutdown();
    result
}

fn start_logging(config: &Config) {
    if let Err(e) = logging::init(&config.log) {
        eprintln!("日志初始化失败，继续运行: {}", e);
    }
}

fn analyze(path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let workload = WorkloadFile::load(path)?.into_workload()?;
    let names = workload.pool.clone();
    let session = TuningSession::new(workload.pool.into_shared(), config.ibg.clone());

    let graphs = session.build_all(&workload.oracle, &workload.statements)?;
    println!("语句索引收益图:");
    for graph in &graphs {
        let root_cost = graph
            .root()
            .cost()
            .map_or_else(|| "?".to_string(), |c| format!("{:.2}", c));
        println!(
            "  语句 {}: 节点 {} (已展开 {}), 完整={}, 根代价 {}, 用到索引 {}",
            graph.statement_id(),
            graph.node_count(),
            graph.expanded_count(),
            graph.is_complete(),
            root_cost,
            format_names(&names, &graph.used_indexes())
        );
    }

    let full = names.full_configuration();
    let print_cost = |label: &str, cost: Option<f64>| match cost {
        Some(cost) => println!("{}: {:.2}", label, cost),
        None => println!("{}: 未覆盖", label),
    };
    print_cost("全部候选索引下的工作负载代价", session.workload_cost(&full)?);
    print_cost("无索引时的工作负载代价", session.workload_cost(&Configuration::new())?);

    let bank = session.analyze_interactions()?;
    let threshold = config.interaction.threshold;
    println!("交互度高于 {} 的索引对:", threshold);
    for (a, b, level) in bank.interacting_pairs(threshold) {
        println!("  {} - {}: {:.2}", name_of(&names, a), name_of(&names, b), level);
    }

    println!("单索引最佳收益:");
    for id in 0..bank.index_count() {
        let benefit = bank.best_benefit(id)?;
        match benefit {
            Some(value) => println!("  {}: {:.2}", name_of(&names, id), value),
            None => println!("  {}: 未计算", name_of(&names, id)),
        }
    }

    let partitions = bank.stable_partitions(threshold);
    println!(
        "稳定分区 {} 个，搜索状态数 {}:",
        partitions.subset_count(),
        partitions.state_count()
    );
    for subset in partitions.subsets() {
        let config: Configuration = subset.iter().copied().collect();
        println!("  {}", format_names(&names, &config));
    }
    Ok(())
}

fn check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let workload = WorkloadFile::load(path)?.into_workload()?;
    let mut violations = 0;
    for statement in &workload.statements {
        let configurations = workload.oracle.configurations(statement.id);
        let report = check_oracle(&workload.oracle, statement, &configurations)?;
        println!(
            "语句 {}: 校验 {} 个配置，违规 {} 处",
            statement.id,
            report.checked,
            report.violations.len()
        );
        for violation in &report.violations {
            println!("  {}", violation);
        }
        violations += report.violations.len();
    }
    if violations > 0 {
        return Err(format!("代价预言共有 {} 处违规", violations).into());
    }
    Ok(())
}

fn name_of(pool: &CandidatePool, id: usize) -> String {
    pool.get(id)
        .map_or_else(|| format!("#{}", id), |index| index.name.clone())
}

fn format_names(pool: &CandidatePool, config: &Configuration) -> String {
    let names: Vec<String> = config.iter().map(|id| name_of(pool, id)).collect();
    format!("{{{}}}", names.join(", "))
}
