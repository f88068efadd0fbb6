//! Local leaderboard derived from the profile roster.

use crate::profile::Roster;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based; equal scores share a rank and the next rank is skipped.
    pub rank: u32,
    pub name: String,
    pub score: u64,
    pub level: u32,
    pub cards: usize,
    pub achievements: usize,
    pub is_current: bool,
}

/// Every profile, highest score first, ties by name.
pub fn rankings(roster: Roster<'_>) -> Vec<LeaderboardEntry> {
    let mut profiles: Vec<_> = roster.profiles().collect();
    profiles.sort_by(|a, b| b.total_score.cmp(&a.total_score).then_with(|| a.name.cmp(&b.name)));

    let current = roster.current();
    let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(profiles.len());
    for (i, p) in profiles.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(prev) if prev.score == p.total_score => prev.rank,
            _ => i as u32 + 1,
        };
        entries.push(LeaderboardEntry {
            rank,
            name: p.name.clone(),
            score: p.total_score,
            level: p.level(),
            cards: p.unlocked_cards.len(),
            achievements: p.achievements.len(),
            is_current: current == Some(p.name.as_str()),
        });
    }
    entries
}
