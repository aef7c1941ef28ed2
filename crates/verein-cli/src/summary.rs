//! Human-readable run summary.

use verein_cli::types::CollectionResult;
use verein_model::format_amount;

/// Print the batch summary: counts, groups, and every exclusion with its
/// reason, so no member disappears from the collection unexplained.
pub fn print_summary(result: &CollectionResult) {
    println!(
        "Members: {} built, {} considered, {} collected",
        result.members_built,
        result.considered,
        result.transactions
    );
    if result.filtered_inactive > 0 {
        println!("  {} inactive member(s) not considered", result.filtered_inactive);
    }
    if result.filtered_contribution_free > 0 {
        println!(
            "  {} contribution-free member(s) not considered",
            result.filtered_contribution_free
        );
    }
    if result.skipped_rows > 0 {
        println!("  {} unusable row(s) skipped", result.skipped_rows);
    }

    for group in &result.grouping.groups {
        println!(
            "Group {}: {} member(s) at {} EUR, subtotal {} EUR",
            group.pmt_inf_id,
            group.transaction_count(),
            format_amount(group.amount),
            format_amount(group.control_sum())
        );
    }
    println!(
        "Control sum: {} EUR across {} transaction(s)",
        format_amount(result.control_sum),
        result.transactions
    );

    if !result.grouping.skipped.is_empty() {
        println!("Excluded ({}):", result.grouping.skipped.len());
        for skipped in &result.grouping.skipped {
            println!(
                "  #{} {} - {}",
                skipped.membership_number, skipped.name, skipped.reason
            );
        }
    }
    if !result.warnings.is_empty() {
        println!(
            "{} data warning(s) recorded, see the log for details",
            result.warnings.len()
        );
    }
    match &result.output {
        Some(path) => println!("Wrote {}", path.display()),
        None => println!("Dry run, no file written"),
    }
}
