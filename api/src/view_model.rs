//! Turns a fetched snapshot into what the dashboard renders.
//!
//! Everything here is pure. The only environmental inputs are the time zone
//! and the locale, which `build_view` takes from the viewer's machine and
//! `build_view_in` takes as arguments.

use std::fmt;

use chrono::DateTime;
use chrono::Local;
use chrono::Locale;
use chrono::TimeZone;
use dioxus_logger::tracing::debug;

use crate::fetcher::RawSnapshot;
use crate::node_rpc::RawBlock;

/// How many of the fetched blocks the dashboard shows.
pub const DISPLAYED_BLOCKS: usize = 5;

/// Length of the proposer prefix kept by [`proposer_label`].
pub const PROPOSER_PREFIX_LEN: usize = 8;

/// The locale's date followed by the locale's time.
const TIMESTAMP_FORMAT: &str = "%x %X";

/// Used when the viewer's locale is unknown or has no formatting data.
pub const FALLBACK_LOCALE: Locale = Locale::en_US;

/// The counters shown in the summary tiles and the height panel.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SummaryStats {
    pub active_delegations: u64,
    pub total_stakers: u64,
    pub finality_providers: u64,
    pub current_block_height: u64,
}

/// One row of the latest-blocks panel.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BlockSummary {
    pub height: u64,
    pub timestamp: String,
    pub transaction_count: usize,
    pub proposer_label: String,
}

/// The render-ready result of one cycle.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DashboardView {
    pub summary: SummaryStats,
    /// Every fetched block, highest first. Up to `BLOCK_WINDOW` entries.
    pub blocks: Vec<BlockSummary>,
}

impl DashboardView {
    /// The blocks the panel displays: the first [`DISPLAYED_BLOCKS`] entries.
    pub fn recent_blocks(&self) -> &[BlockSummary] {
        &self.blocks[..self.blocks.len().min(DISPLAYED_BLOCKS)]
    }
}

/// What the dashboard is currently showing.
#[derive(Clone, PartialEq, Eq, Debug, Default, strum::EnumIs)]
pub enum DashboardState {
    /// No cycle has completed yet.
    #[default]
    Loading,
    Loaded(DashboardView),
}

impl DashboardState {
    pub fn view(&self) -> Option<&DashboardView> {
        match self {
            Self::Loading => None,
            Self::Loaded(view) => Some(view),
        }
    }
}

/// Builds the view, formatting timestamps in the viewer's local time zone
/// and locale.
pub fn build_view(snapshot: RawSnapshot) -> DashboardView {
    build_view_in(snapshot, &Local, viewer_locale())
}

/// The locale reported by the OS (or the browser on wasm), or
/// [`FALLBACK_LOCALE`].
pub fn viewer_locale() -> Locale {
    match sys_locale::get_locale() {
        Some(tag) => parse_locale(&tag).unwrap_or_else(|| {
            debug!("no formatting data for locale {}; using {:?}", tag, FALLBACK_LOCALE);
            FALLBACK_LOCALE
        }),
        None => FALLBACK_LOCALE,
    }
}

/// Maps a BCP 47 or POSIX locale tag (`de-DE`, `fr_BE.UTF-8`, `de`) to a
/// chrono [`Locale`].
///
/// A bare language tries the language's own country (`de` -> `de_DE`).
pub fn parse_locale(tag: &str) -> Option<Locale> {
    let tag = tag.split(['.', '@']).next().unwrap_or_default();
    let mut parts = tag.split(['-', '_']).filter(|part| !part.is_empty());
    let language = parts.next()?.to_ascii_lowercase();
    let region = parts.find(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()));

    let candidate = match region {
        Some(region) => format!("{language}_{}", region.to_ascii_uppercase()),
        None => format!("{language}_{}", language.to_ascii_uppercase()),
    };
    Locale::try_from(candidate.as_str())
        .or_else(|_| Locale::try_from(language.as_str()))
        .ok()
}

/// Builds the view, formatting timestamps in `tz` with the conventions of
/// `locale`.
pub fn build_view_in<Tz>(snapshot: RawSnapshot, tz: &Tz, locale: Locale) -> DashboardView
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let staking = snapshot.staking;
    let summary = SummaryStats {
        active_delegations: staking.active_delegations.unwrap_or(0),
        total_stakers: staking.total_stakers.unwrap_or(0),
        finality_providers: staking.finality_providers.unwrap_or(0),
        current_block_height: snapshot.height,
    };

    let blocks = snapshot
        .blocks
        .into_iter()
        .map(|block| summarize_block(block, tz, locale))
        .collect();

    DashboardView { summary, blocks }
}

fn summarize_block<Tz>(block: RawBlock, tz: &Tz, locale: Locale) -> BlockSummary
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    BlockSummary {
        height: block.height,
        timestamp: format_timestamp_in(&block.time, tz, locale),
        transaction_count: block.tx_count,
        proposer_label: proposer_label(&block.proposer_address),
    }
}

/// Formats an RFC 3339 timestamp in `tz` using the date and time layout of
/// `locale`. Unparseable input is returned as is.
pub fn format_timestamp_in<Tz>(raw: &str, tz: &Tz, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt
            .with_timezone(tz)
            .format_localized(TIMESTAMP_FORMAT, locale)
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

/// The first [`PROPOSER_PREFIX_LEN`] characters of `proposer` followed by `…`.
///
/// Shorter identifiers are kept whole, so `"AB"` becomes `"AB…"`.
pub fn proposer_label(proposer: &str) -> String {
    let prefix: String = proposer.chars().take(PROPOSER_PREFIX_LEN).collect();
    format!("{prefix}…")
}

/// Formats a count with comma thousands separators (`1234567` -> `1,234,567`).
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staking::StakingStats;
    use chrono::FixedOffset;
    use chrono::Utc;

    fn raw_block(height: u64) -> RawBlock {
        RawBlock {
            height,
            time: "2024-05-01T14:03:09.123456789Z".to_string(),
            proposer_address: "0123456789ABCDEF".to_string(),
            tx_count: 3,
        }
    }

    fn snapshot(height: u64, heights: &[u64]) -> RawSnapshot {
        RawSnapshot {
            height,
            staking: StakingStats::default(),
            blocks: heights.iter().copied().map(raw_block).collect(),
        }
    }

    #[test]
    fn proposer_label_truncates_to_eight_chars() {
        assert_eq!(proposer_label("ABCDEFGHIJKL"), "ABCDEFGH…");
        assert_eq!(proposer_label("ABCDEFGH"), "ABCDEFGH…");
    }

    #[test]
    fn proposer_label_keeps_short_ids_whole() {
        assert_eq!(proposer_label("AB"), "AB…");
        assert_eq!(proposer_label(""), "…");
    }

    #[test]
    fn proposer_label_counts_chars_not_bytes() {
        assert_eq!(proposer_label("ääääääääää"), "ääääääää…");
    }

    #[test]
    fn missing_staking_fields_become_zero() {
        let mut snap = snapshot(1000, &[]);
        snap.staking = StakingStats {
            active_delegations: Some(500),
            total_stakers: None,
            finality_providers: Some(12),
        };

        let view = build_view_in(snap, &Utc, Locale::en_US);
        assert_eq!(
            view.summary,
            SummaryStats {
                active_delegations: 500,
                total_stakers: 0,
                finality_providers: 12,
                current_block_height: 1000,
            }
        );
    }

    #[test]
    fn timestamps_follow_the_given_zone() {
        let utc = format_timestamp_in("2024-05-01T14:03:09.5Z", &Utc, Locale::en_US);
        assert_eq!(utc, "05/01/2024 02:03:09 PM");

        let plus_ten = FixedOffset::east_opt(10 * 3600).unwrap();
        let shifted = format_timestamp_in("2024-05-01T14:03:09Z", &plus_ten, Locale::en_US);
        assert_eq!(shifted, "05/02/2024 12:03:09 AM");
    }

    #[test]
    fn timestamps_follow_the_given_locale() {
        let raw = "2024-05-01T14:03:09Z";
        let us = format_timestamp_in(raw, &Utc, Locale::en_US);
        let german = format_timestamp_in(raw, &Utc, Locale::de_DE);

        assert_eq!(german, "01.05.2024 14:03:09");
        assert_ne!(us, german);
    }

    #[test]
    fn unparseable_timestamp_is_shown_verbatim() {
        assert_eq!(
            format_timestamp_in("yesterday", &Utc, Locale::de_DE),
            "yesterday"
        );
    }

    #[test]
    fn locale_tags_are_recognised() {
        assert_eq!(parse_locale("de-DE"), Some(Locale::de_DE));
        assert_eq!(parse_locale("fr_BE.UTF-8"), Some(Locale::fr_BE));
        assert_eq!(parse_locale("en-us"), Some(Locale::en_US));
        assert_eq!(parse_locale("de"), Some(Locale::de_DE));
        assert_eq!(parse_locale("zh-Hans-CN"), Some(Locale::zh_CN));
        assert_eq!(parse_locale("xx-YY"), None);
        assert_eq!(parse_locale(""), None);
    }

    #[test]
    fn gaps_and_order_are_preserved() {
        let view = build_view_in(snapshot(1001, &[1001, 1000, 998]), &Utc, Locale::en_US);
        let heights: Vec<u64> = view.blocks.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![1001, 1000, 998]);
        assert_eq!(view.blocks[0].proposer_label, "01234567…");
        assert_eq!(view.blocks[0].transaction_count, 3);
    }

    #[test]
    fn only_five_blocks_are_displayed() {
        let heights: Vec<u64> = (91..=100).rev().collect();
        let view = build_view_in(snapshot(100, &heights), &Utc, Locale::en_US);

        assert_eq!(view.blocks.len(), 10);
        let shown: Vec<u64> = view.recent_blocks().iter().map(|b| b.height).collect();
        assert_eq!(shown, vec![100, 99, 98, 97, 96]);

        let short = build_view_in(snapshot(2, &[2, 1]), &Utc, Locale::en_US);
        assert_eq!(short.recent_blocks().len(), 2);
    }

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn loading_has_no_view() {
        assert!(DashboardState::default().is_loading());
        assert!(DashboardState::Loading.view().is_none());
    }
}
