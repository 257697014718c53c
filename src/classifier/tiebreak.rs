//! User-Agent second pass, applied only when the score-based winner is
//! not unique. Checks run from the most to the least specific token and
//! only ever return a category from the tied candidate set.

use serde::Serialize;

use super::category::OsCategory;

use super::category::OsCategory::{Android, Ios, Ipados, Linux, Macos, Windows};

/// Audit record of a tie-break attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TieBreak {
    pub candidates: Vec<OsCategory>,
    pub winner: Option<OsCategory>,
    pub reason: String,
}

pub fn break_tie(candidates: &[OsCategory], user_agent: &str, platform: &str) -> TieBreak {
    let ua = user_agent.to_lowercase();
    let platform = platform.to_lowercase();
    let pick = |category: OsCategory| candidates.contains(&category).then_some(category);
    let hit = |winner: OsCategory, reason: &str| TieBreak {
        candidates: candidates.to_vec(),
        winner: Some(winner),
        reason: reason.to_string(),
    };

    if ua.contains("android") {
        if let Some(winner) = pick(Android) {
            return hit(winner, "UA contains android");
        }
    }
    if ua.contains("iphone") || ua.contains("ipod") {
        if let Some(winner) = pick(Ios).or_else(|| pick(Ipados)) {
            return hit(winner, "UA contains iPhone/iPod");
        }
    }
    if ua.contains("ipad") {
        if let Some(winner) = pick(Ipados).or_else(|| pick(Ios)) {
            return hit(winner, "UA contains iPad");
        }
    }
    if ua.contains("mac os x") || ua.contains("macintosh") || platform.contains("mac") {
        // iPadOS 13+ masquerades as a Mac but keeps the Mobile token.
        if ua.contains("mobile") {
            if let Some(winner) = pick(Ipados).or_else(|| pick(Ios)) {
                return hit(winner, "UA contains Macintosh with Mobile");
            }
        }
        if let Some(winner) = pick(Macos).or_else(|| pick(Ipados)) {
            return hit(winner, "UA contains Mac OS X/Macintosh");
        }
    }
    if ua.contains("windows nt") {
        if let Some(winner) = pick(Windows) {
            return hit(winner, "UA contains Windows NT");
        }
    }
    if ua.contains("cros") || ua.contains("x11") || ua.contains("linux") {
        if let Some(winner) = pick(Linux) {
            return hit(winner, "UA contains CrOS/X11/Linux");
        }
    }

    TieBreak {
        candidates: candidates.to_vec(),
        winner: None,
        reason: "no UA token matched the tied set".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
         AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

    #[test]
    fn test_iphone_ua_prefers_ios_over_ipados() {
        let result = break_tie(&[Ios, Ipados], IPHONE_UA, "iPhone");
        assert_eq!(result.winner, Some(Ios));
    }

    #[test]
    fn test_iphone_ua_falls_back_to_ipados() {
        let result = break_tie(&[Ipados, Macos], IPHONE_UA, "iPhone");
        assert_eq!(result.winner, Some(Ipados));
    }

    #[test]
    fn test_windows_nt_token() {
        let result = break_tie(
            &[Macos, Windows, Linux],
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
            "Win32",
        );
        assert_eq!(result.winner, Some(Windows));
    }

    #[test]
    fn test_desktop_ipad_ua_prefers_ipados_when_mobile_token_present() {
        let result = break_tie(
            &[Ios, Ipados],
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15) Mobile/15E148 Safari/604.1",
            "MacIntel",
        );
        assert_eq!(result.winner, Some(Ipados));
    }

    #[test]
    fn test_mac_ua_without_mobile_prefers_macos() {
        let result = break_tie(
            &[Macos, Windows],
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) Safari/605.1.15",
            "MacIntel",
        );
        assert_eq!(result.winner, Some(Macos));
    }

    #[test]
    fn test_mac_platform_alone_is_enough() {
        let result = break_tie(&[Macos, Linux], "", "MacIntel");
        assert_eq!(result.winner, Some(Macos));
    }

    #[test]
    fn test_no_token_leaves_tie_unresolved() {
        let result = break_tie(&[Macos, Windows, Linux], "Mozilla/5.0 (Unknown)", "");
        assert_eq!(result.winner, None);
        assert_eq!(result.candidates.len(), 3);
    }

    #[test]
    fn test_android_token_only_picks_a_tied_android() {
        let result = break_tie(
            &[Macos, Windows],
            "Mozilla/5.0 (Linux; Android 14; Pixel 8)",
            "Linux armv8l",
        );
        // android is not tied; the linux token does not match either
        // candidate, so the tie stays unresolved.
        assert_eq!(result.winner, None);
    }
}
