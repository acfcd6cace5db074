//! Text rendering of roll results.

use colored::Colorize;
use td_dice::{PercentileResult, RollResult, SuccessLevel};

/// `2d6+1 = (3 + 4) + 1 = 8`, followed by any markers.
pub fn roll_line(result: &RollResult) -> String {
    let mut line = format!("{} = {}", result.spec, result);
    if result.is_critical_success {
        line.push_str(&format!(" {}", "critical success!".green().bold()));
    }
    if result.is_critical_fail {
        line.push_str(&format!(" {}", "critical fail!".red().bold()));
    }
    match result.comparison {
        Some(true) => line.push_str(&format!(" {}", "success".green())),
        Some(false) => line.push_str(&format!(" {}", "failure".red())),
        None => {}
    }
    line
}

/// Roll and tier of one percentile check.
pub fn percentile_line(result: &PercentileResult) -> String {
    let label = result.success_level.label();
    let label = match result.success_level {
        SuccessLevel::CriticalSuccess => label.green().bold(),
        SuccessLevel::CriticalFailure => label.red().bold(),
        level if level.is_success() => label.green(),
        _ => label.red(),
    };
    format!("{:>3} -> {label}", result.roll)
}
