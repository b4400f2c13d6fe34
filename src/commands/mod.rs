// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analysis;
pub mod auth;
pub mod chat;
pub mod contact;
pub mod dashboard;
pub mod exporter;
pub mod goals;
pub mod insights;
pub mod session;
pub mod transactions;

use anyhow::Result;

use crate::filter::TypeFilter;
use crate::utils::parse_date;
use crate::view::AnalysisView;

/// Applies `--type`, `--segment` and `--from/--to` to a freshly loaded view,
/// in the order a user would click them.
pub fn apply_filter_args(view: &mut AnalysisView, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(t) = sub.get_one::<String>("type") {
        view.select_type(TypeFilter::parse(t)?);
    }
    if let Ok(Some(segments)) = sub.try_get_many::<String>("segment") {
        for s in segments {
            view.click_segment(s.parse()?);
        }
    }
    let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    if from.is_some() != to.is_some() {
        log::warn!("date range needs both --from and --to; showing all dates");
    }
    view.set_date_range(from, to);
    Ok(())
}
