use crate::analysis::{GapDirection, Metric, MetricGap, ProfileMetrics};
use crate::domain::RankEntry;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ProfileRow {
    metric: String,
    value: String,
}

#[derive(Tabled)]
struct GapRow {
    #[tabled(rename = "#")]
    rank: String,
    metric: String,
    you: String,
    current: String,
    next: String,
    gap: String,
    status: String,
}

/// KDA and the per-minute rates read best with different precision.
fn format_value(metric: Metric, value: f64) -> String {
    match metric {
        Metric::GoldPerMin | Metric::DamagePerMin => format!("{:.0}", value),
        _ => format!("{:.2}", value),
    }
}

pub fn display_rank(entry: Option<&RankEntry>, benchmark_tier: &str) {
    match entry {
        Some(entry) => {
            let mut line = format!(
                "{} {} LP, {}W {}L ({:.1}% WR)",
                entry.full_label().bold(),
                entry.league_points(),
                entry.wins(),
                entry.losses(),
                entry.win_rate()
            );
            if entry.flags().hot_streak {
                line.push_str(&format!(" {}", "hot streak".red()));
            }
            if entry.flags().inactive {
                line.push_str(&format!(" {}", "decaying".yellow()));
            }
            println!("{} {}", "🏆 Rank:".bold(), line);
        }
        None => println!("{} {}", "🏆 Rank:".bold(), "unranked".dimmed()),
    }
    println!("{} {}\n", "📐 Benchmark tier:".bold(), benchmark_tier.cyan());
}

pub fn display_profile(profile: &ProfileMetrics) {
    println!(
        "\n{}",
        format!("📊 PROFILE (Last {} Games)", profile.sample_size)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if !profile.has_data() {
        println!("{}", "No eligible matches to build a profile from".yellow());
        return;
    }

    let mut rows: Vec<ProfileRow> = Metric::ALL
        .iter()
        .map(|&metric| ProfileRow {
            metric: metric.label().to_string(),
            value: format_value(metric, profile.value(metric)),
        })
        .collect();
    rows.push(ProfileRow {
        metric: "Win rate".to_string(),
        value: format!("{:.1}%", profile.win_rate),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_gaps(gaps: &[MetricGap], current_tier: &str, next_tier: &str) {
    println!(
        "\n{}",
        format!("🎯 RANK GAPS vs {} (next: {})", current_tier, next_tier)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(80).cyan());

    let rows: Vec<GapRow> = gaps
        .iter()
        .enumerate()
        .map(|(idx, gap)| {
            let status = match gap.direction {
                GapDirection::Below => "BELOW".red().to_string(),
                GapDirection::AtPar => "AT PAR".yellow().to_string(),
                GapDirection::Above => "ABOVE".green().to_string(),
            };
            GapRow {
                rank: format!("{}", idx + 1),
                metric: gap.metric.label().to_string(),
                you: format_value(gap.metric, gap.player_value),
                current: format_value(gap.metric, gap.current_benchmark),
                next: format_value(gap.metric, gap.next_benchmark),
                gap: format!("{:+.1}%", -gap.relative_gap),
                status,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    println!("\n{}", "Interpretation".bold().yellow());
    println!("• Gap: your value relative to the {} benchmark", current_tier);
    println!("• Metrics below benchmark are listed first, largest shortfall on top\n");

    match gaps.iter().find(|g| g.is_below()) {
        Some(top) => {
            println!("{}", "Focus First".bold().red());
            println!(
                "  {} is {:.1}% under {} ({} vs {}), {} needs {}",
                top.metric.label(),
                top.relative_gap,
                current_tier,
                format_value(top.metric, top.player_value),
                format_value(top.metric, top.current_benchmark),
                next_tier,
                format_value(top.metric, top.next_benchmark)
            );
        }
        None => println!(
            "{}",
            format!("✨ At or above {} on every metric", current_tier).green()
        ),
    }

    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

fn warning_line(message: &str) -> String {
    format!("{} {}", "⚠️".yellow(), message)
}

fn info_line(message: &str) -> String {
    format!("{} {}", "ℹ️".cyan(), message)
}

fn success_line(message: &str) -> String {
    format!("{} {}", "✓".green(), message)
}

/// Progress output for one run. A quiet console keeps stdout free for a
/// machine-readable report: info and success lines are dropped and
/// warnings go to the log on stderr.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    quiet: bool,
}

impl Console {
    pub fn new(quiet: bool) -> Self {
        Console { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// What would be printed to stdout for a line, if anything.
    fn stdout_line(&self, line: impl FnOnce() -> String) -> Option<String> {
        (!self.quiet).then(line)
    }

    pub fn info(&self, message: &str) {
        if let Some(line) = self.stdout_line(|| info_line(message)) {
            println!("{}", line);
        }
    }

    pub fn success(&self, message: &str) {
        if let Some(line) = self.stdout_line(|| success_line(message)) {
            println!("{}", line);
        }
    }

    pub fn warning(&self, message: &str) {
        match self.stdout_line(|| warning_line(message)) {
            Some(line) => println!("{}", line),
            None => tracing::warn!("{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_precision() {
        assert_eq!(format_value(Metric::Kda, 2.345), "2.35");
        assert_eq!(format_value(Metric::CsPerMin, 6.0), "6.00");
        assert_eq!(format_value(Metric::GoldPerMin, 401.6), "402");
    }

    #[test]
    fn test_quiet_console_keeps_stdout_clean() {
        let quiet = Console::new(true);
        assert!(quiet.is_quiet());
        assert_eq!(quiet.stdout_line(|| warning_line("No ranked matches")), None);
        assert_eq!(quiet.stdout_line(|| info_line("Step 1")), None);

        let loud = Console::new(false);
        let line = loud.stdout_line(|| warning_line("No ranked matches")).unwrap();
        assert!(line.ends_with("No ranked matches"));
    }
}
