use anyhow::{Context, Result, bail};
use catalog::{Catalog, FileCatalogProvider};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use packager::{FallbackStrategy, Package, PackageOrigin, PackageRequest, PackagerConfig};
use server::{PackageOrchestrator, RecommendRequest, RecommendResponse};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Event Packager - service bundle recommendations for event planning
#[derive(Parser)]
#[command(name = "event-packager")]
#[command(about = "Recommend event service packages within a budget", long_about = None)]
struct Cli {
    /// Path to the catalog file (JSON array or JSON lines)
    #[arg(short, long, default_value = "data/catalog.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend packages for a set of categories
    Recommend {
        /// Required service category (repeat for several)
        #[arg(long = "category", required = true)]
        categories: Vec<String>,

        /// Client budget
        #[arg(long)]
        budget: f64,

        /// Event date, compared verbatim with booked dates
        #[arg(long)]
        date: String,

        /// Number of packages to return
        #[arg(long, default_value = "3")]
        quota: usize,

        /// How fallback packages are synthesized
        #[arg(long, value_enum, default_value = "cyclic")]
        strategy: StrategyArg,

        /// Print the response envelope as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show categories with offering counts and price ranges
    Categories,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,

        /// Event date used for every request
        #[arg(long, default_value = "2024-06-15")]
        date: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Cyclic,
    NextCheapest,
}

impl From<StrategyArg> for FallbackStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Cyclic => FallbackStrategy::Cyclic,
            StrategyArg::NextCheapest => FallbackStrategy::NextCheapest,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend {
            categories,
            budget,
            date,
            quota,
            strategy,
            json,
        } => {
            let config = PackagerConfig::new()
                .with_package_quota(quota)
                .with_fallback_strategy(strategy.into());
            let request = RecommendRequest {
                categories,
                budget,
                date,
            };
            handle_recommend(cli.catalog, config, request, json).await?
        }
        Commands::Categories => handle_categories(&cli.catalog)?,
        Commands::Benchmark {
            requests,
            concurrent,
            date,
        } => handle_benchmark(cli.catalog, requests, concurrent, date).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    catalog_path: PathBuf,
    config: PackagerConfig,
    request: RecommendRequest,
    json: bool,
) -> Result<()> {
    let ceiling = config.budget_ceiling(request.budget);
    let orchestrator =
        PackageOrchestrator::new(Arc::new(FileCatalogProvider::new(catalog_path)), config);

    if json {
        return print_envelope(&orchestrator.handle(request).await);
    }

    let request = request.into_package_request()?;
    let packages = orchestrator
        .get_packages(request.clone())
        .await
        .context("Recommendation failed")?;

    print_packages(&packages, &request, ceiling);
    Ok(())
}

/// Print the response envelope; an error envelope still fails the command
fn print_envelope(response: &RecommendResponse) -> Result<()> {
    println!("{}", response.to_json().context("Failed to serialize response")?);
    if let RecommendResponse::Error { error } = response {
        bail!("Recommendation failed: {}", error.message);
    }
    Ok(())
}

/// Handle the 'categories' command
fn handle_categories(catalog_path: &Path) -> Result<()> {
    let start = Instant::now();
    let catalog = Catalog::load_from_file(catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    println!(
        "{} Loaded {} offerings in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    println!("{}", "Categories:".bold().blue());
    for category in catalog.categories() {
        let Some(stats) = catalog.get_category_stats(category) else {
            continue;
        };
        println!(
            "{}{} - {} offerings, {:.2} to {:.2}, avg rating {:.2}",
            "• ".green(),
            category.bold(),
            stats.offering_count,
            stats.min_price,
            stats.max_price,
            stats.avg_rating
        );
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    catalog_path: PathBuf,
    requests: usize,
    concurrent: usize,
    date: String,
) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    // Pick up to three categories from the catalog itself
    let catalog = Catalog::load_from_file(&catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    let categories: Vec<String> = catalog
        .categories()
        .into_iter()
        .take(3)
        .map(str::to_string)
        .collect();
    if categories.is_empty() {
        bail!("Catalog {} has no categories", catalog_path.display());
    }
    println!(
        "Benchmarking {} requests ({} concurrent) over {:?}",
        requests, concurrent, categories
    );

    let orchestrator = PackageOrchestrator::new(
        Arc::new(FileCatalogProvider::new(catalog_path)),
        PackagerConfig::default(),
    );
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));

    let wall_clock = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for _ in 0..requests {
        let budget = rand::random_range(500.0..5000.0);
        let request = PackageRequest::new(categories.clone(), budget, date.clone())?;
        let orchestrator = orchestrator.clone();
        let permits = Arc::clone(&permits);

        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            let succeeded = orchestrator.get_packages(request).await.is_ok();
            Ok::<_, anyhow::Error>((start.elapsed(), succeeded))
        }));
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    let mut failures = 0;
    for handle in handles {
        let (elapsed, succeeded) = handle.await??;
        timings.push(elapsed);
        if !succeeded {
            failures += 1;
        }
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);
    println!("Requests without packages: {}", failures);

    Ok(())
}

fn print_packages(packages: &[Package], request: &PackageRequest, ceiling: f64) {
    println!(
        "{}",
        format!(
            "Packages for {} on {} (budget {:.2}, ceiling {:.2}):",
            request.categories().join(", "),
            request.date(),
            request.budget(),
            ceiling
        )
        .bold()
        .blue()
    );

    for package in packages {
        let mut header = format!(
            "{} - {:.2} (score {:.2})",
            package.name.green(),
            package.total_price,
            package.score
        );
        if package.origin == PackageOrigin::Fallback {
            header.push_str(&format!(" {}", "[fallback]".yellow()));
            if !package.within_ceiling(ceiling) {
                header.push_str(&format!(" {}", "over ceiling".red()));
            }
        }
        println!("{header}");

        for item in &package.items {
            let rating = item
                .rating
                .map(|r| format!("{r:.1}"))
                .unwrap_or_else(|| "unrated".to_string());
            println!(
                "   {} {}: {} ({:.2}, {})",
                "•".cyan(),
                item.category,
                item.display_name(),
                item.price,
                rating
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packager::PackagerError;

    #[test]
    fn test_error_envelope_fails_command() {
        let response = RecommendResponse::from_result(Err(PackagerError::EmptyCatalog));
        let err = print_envelope(&response).unwrap_err();
        assert!(err.to_string().contains("Recommendation failed"));
    }

    #[test]
    fn test_packages_envelope_succeeds() {
        let response = RecommendResponse::from_result(Ok(vec![]));
        assert!(print_envelope(&response).is_ok());
    }
}
