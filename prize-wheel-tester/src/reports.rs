use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use crate::simulation::SimulationReport;

pub fn generate_console_report<W: Write>(writer: &mut W, report: &SimulationReport) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "📊 Spin Simulation Summary".bright_cyan().bold())?;
    writeln!(writer, "{}", "==========================".cyan())?;
    writeln!(writer, "Seed: {}", report.seed)?;
    writeln!(
        writer,
        "Spins: {}/{} completed",
        report.spins_completed, report.spins_requested
    )?;
    writeln!(writer, "Tolerance: ±{:.3}", report.tolerance)?;
    writeln!(writer, "Final rotation: {:.1}°", report.final_rotation)?;
    writeln!(writer, "Elapsed: {:?}", report.duration)?;
    writeln!(writer)?;

    writeln!(
        writer,
        "{:>4}  {:<30} {:>8} {:>10} {:>10} {:>8}",
        "id", "option", "weight", "expected", "observed", "wins"
    )?;
    for tally in &report.tallies {
        let observed = format!("{:.4}", tally.observed_rate);
        let observed = if tally.drift() > report.tolerance {
            observed.red()
        } else {
            observed.green()
        };
        writeln!(
            writer,
            "{:>4}  {:<30} {:>8.1} {:>10.4} {:>10} {:>8}",
            tally.id, tally.text, tally.weight, tally.expected_rate, observed, tally.wins
        )?;
    }
    writeln!(writer)?;

    if let Some(refusal) = &report.refusal {
        writeln!(writer, "{} {}", "⚠️  Spin refused:".yellow(), refusal)?;
    }
    if report.passed {
        writeln!(writer, "{}", "✅ PASS".green().bold())?;
    } else {
        writeln!(writer, "{}", "❌ FAIL".red().bold())?;
        for failure in &report.failures {
            writeln!(writer, "   • {}", failure.red())?;
        }
    }
    Ok(())
}

pub fn generate_json_report<W: Write>(writer: &mut W, report: &SimulationReport) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(writer: &mut W, report: &SimulationReport) -> Result<()> {
    writeln!(writer, "# Prize Wheel Spin Simulation\n")?;

    writeln!(writer, "## Summary\n")?;
    writeln!(writer, "- **Seed**: {}", report.seed)?;
    writeln!(
        writer,
        "- **Spins**: {}/{} completed",
        report.spins_completed, report.spins_requested
    )?;
    writeln!(writer, "- **Tolerance**: ±{:.3}", report.tolerance)?;
    writeln!(
        writer,
        "- **Result**: {}\n",
        if report.passed { "✅ pass" } else { "❌ fail" }
    )?;

    writeln!(writer, "## Odds\n")?;
    writeln!(writer, "| Id | Option | Weight | Expected | Observed | Wins |")?;
    writeln!(writer, "|---:|---|---:|---:|---:|---:|")?;
    for tally in &report.tallies {
        writeln!(
            writer,
            "| {} | {} | {:.1} | {:.4} | {:.4} | {} |",
            tally.id,
            tally.text.replace('|', "\\|"),
            tally.weight,
            tally.expected_rate,
            tally.observed_rate,
            tally.wins
        )?;
    }
    writeln!(writer)?;

    if !report.failures.is_empty() {
        writeln!(writer, "## Failures\n")?;
        for failure in &report.failures {
            writeln!(writer, "- {failure}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::OptionTally;
    use std::time::Duration;

    fn sample_report(passed: bool) -> SimulationReport {
        SimulationReport {
            seed: 1337,
            spins_requested: 100,
            spins_completed: 100,
            tolerance: 0.05,
            final_rotation: 181_234.5,
            tallies: vec![
                OptionTally {
                    id: 1,
                    text: "Mug | Large".to_string(),
                    weight: 60.0,
                    expected_rate: 0.6,
                    wins: 58,
                    observed_rate: 0.58,
                },
                OptionTally {
                    id: 2,
                    text: "Hat".to_string(),
                    weight: 40.0,
                    expected_rate: 0.4,
                    wins: 42,
                    observed_rate: 0.42,
                },
            ],
            refusal: None,
            failures: if passed {
                Vec::new()
            } else {
                vec!["option 2 'Hat' drifted".to_string()]
            },
            passed,
            duration: Duration::from_millis(3),
        }
    }

    fn render(
        f: fn(&mut Vec<u8>, &SimulationReport) -> Result<()>,
        report: &SimulationReport,
    ) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer, report).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn json_report_serializes_tallies() {
        let content = render(generate_json_report, &sample_report(true));
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["seed"], 1337);
        assert_eq!(parsed["tallies"][1]["wins"], 42);
        assert_eq!(parsed["passed"], true);
    }

    #[test]
    fn markdown_report_escapes_pipes_and_lists_failures() {
        let content = render(generate_markdown_report, &sample_report(false));
        assert!(content.starts_with("# Prize Wheel Spin Simulation"));
        assert!(content.contains("Mug \\| Large"));
        assert!(content.contains("## Failures"));
        assert!(content.contains("- option 2 'Hat' drifted"));
    }

    #[test]
    fn console_report_marks_outcome() {
        colored::control::set_override(false);
        let passing = render(generate_console_report, &sample_report(true));
        assert!(passing.contains("PASS"));
        assert!(passing.contains("100/100 completed"));
        let failing = render(generate_console_report, &sample_report(false));
        assert!(failing.contains("FAIL"));
        assert!(failing.contains("drifted"));
    }
}
