//! Subcommand implementations.

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;

use verein_cli::pipeline::{CollectRequest, run_collection};
use verein_cli::profile::load_profile;
use verein_cli::types::CollectionResult;
use verein_model::{DuplicatePolicy, Profile, ensure_positive, parse_amount};
use verein_sepa::{ContributionScheme, check_originator};

use crate::cli::{CheckProfileArgs, CollectArgs, DuplicatesArg};

pub fn run_collect(args: &CollectArgs) -> Result<CollectionResult> {
    let profile = load_profile(&args.profile)?;
    let request = resolve_request(args, profile)?;
    run_collection(&request)
}

/// Merge profile options with their command-line overrides.
fn resolve_request(args: &CollectArgs, profile: Profile) -> Result<CollectRequest> {
    let default_contribution = resolve_default_contribution(args, &profile)?;
    let scheme = if args.uniform {
        ContributionScheme::Uniform(default_contribution)
    } else {
        ContributionScheme::PerMember {
            default: default_contribution,
        }
    };
    let with_bom = if args.bom {
        true
    } else if args.no_bom {
        false
    } else {
        profile.options.with_bom
    };
    let duplicates = match args.duplicates {
        Some(DuplicatesArg::Reject) => DuplicatePolicy::Reject,
        Some(DuplicatesArg::KeepLast) => DuplicatePolicy::KeepLast,
        None => profile.options.duplicates,
    };
    Ok(CollectRequest {
        input: args.input.clone(),
        output: args.output.clone(),
        originator: profile.originator,
        scheme,
        duplicates,
        with_bom,
        include_inactive: args.include_inactive,
        include_contribution_free: args.include_contribution_free,
        dry_run: args.dry_run,
    })
}

fn resolve_default_contribution(args: &CollectArgs, profile: &Profile) -> Result<Decimal> {
    let amount = match &args.contribution {
        Some(raw) => parse_amount(raw).with_context(|| format!("--contribution {raw:?}"))?,
        None => match profile.options.default_contribution {
            Some(amount) => amount,
            None => bail!(
                "no default contribution configured; pass --contribution or set \
                 options.default_contribution in the profile"
            ),
        },
    };
    ensure_positive(amount).context("default contribution")
}

/// Check a profile's identifiers and print every problem found.
///
/// Returns whether the profile is usable.
pub fn run_check_profile(args: &CheckProfileArgs) -> Result<bool> {
    let profile = load_profile(&args.profile)?;
    let issues = check_originator(&profile.originator);
    if issues.is_empty() {
        println!("Profile {} is usable.", args.profile.display());
        return Ok(true);
    }
    println!(
        "Profile {} has {} problem(s):",
        args.profile.display(),
        issues.len()
    );
    for issue in &issues {
        println!("  {}: {}", issue.field, issue.message);
    }
    Ok(false)
}
