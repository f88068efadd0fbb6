//! Screen layouts: map an arcade [`View`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use body_quest_core::session::{BuilderRound, MatchRound, QuizPhase, QuizRound};
use body_quest_core::{CollectionFilter, View};

use crate::fb::{str_width, CellStyle, FrameBuffer, Rgb};
use crate::shell::{TerminalShell, Toast};
use crate::types::{Achievement, GameMode, Screen, Severity, SystemId, QUIZ_START_HP};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Home menu rows, in order.
pub const HOME_MENU: [&str; 5] = [
    "System Match",
    "Body Builder",
    "Body Quiz",
    "Card Collection",
    "Leaderboard",
];

const ACCENT: Rgb = Rgb::new(255, 196, 0);
const MUTED: Rgb = Rgb::new(130, 130, 140);
const GOOD: Rgb = Rgb::new(90, 200, 120);
const BAD: Rgb = Rgb::new(230, 90, 80);
const HIGHLIGHT_BG: Rgb = Rgb::new(50, 50, 80);
const BODY_W: u16 = 30;
const BODY_H: u16 = 18;

fn text() -> CellStyle {
    CellStyle::default()
}

fn muted() -> CellStyle {
    CellStyle::fg(MUTED)
}

fn title() -> CellStyle {
    CellStyle::fg(ACCENT).bold()
}

fn highlighted(selected: bool, style: CellStyle) -> CellStyle {
    if selected {
        style.on(HIGHLIGHT_BG).bold()
    } else {
        style
    }
}

fn system_style(view: &View<'_>, id: &SystemId) -> CellStyle {
    let color = Rgb::from_hex(view.catalog.system_color(id)).unwrap_or(MUTED);
    CellStyle::fg(color)
}

/// Render `screen` into `fb`, resizing it to the viewport first.
pub fn draw(fb: &mut FrameBuffer, viewport: Viewport, screen: Screen, view: &View<'_>, shell: &TerminalShell) {
    fb.resize(viewport.width, viewport.height);
    fb.clear(text().into_cell(' '));

    draw_header(fb, view);
    match screen {
        Screen::Register => draw_register(fb, view, shell),
        Screen::Home => draw_home(fb, view, shell),
        Screen::SystemMatch => {
            if let Some(round) = view.session.and_then(|s| s.as_match()) {
                draw_match(fb, view, round, shell);
            }
        }
        Screen::BodyBuilder => {
            if let Some(round) = view.session.and_then(|s| s.as_builder()) {
                draw_builder(fb, view, round, shell);
            }
        }
        Screen::Quiz => {
            if let Some(round) = view.session.and_then(|s| s.as_quiz()) {
                draw_quiz(fb, round, shell);
            }
        }
        Screen::Results => draw_results(fb, view),
        Screen::Collection => draw_collection(fb, view, shell),
        Screen::Leaderboard => draw_leaderboard(fb, view),
    }
    draw_footer(fb, screen);
    draw_toasts(fb, shell.toasts());
}

fn draw_header(fb: &mut FrameBuffer, view: &View<'_>) {
    let end = fb.put_str(1, 0, "🩺 BODY QUEST", title());
    if let Some(p) = view.player {
        let info = format!(
            "{}  ·  Lv.{} {}  ·  {} pts",
            p.name,
            p.level(),
            p.level_title(),
            p.total_score
        );
        let x = fb.width().saturating_sub(str_width(&info) + 1).max(end + 2);
        fb.put_str(x, 0, &info, muted());
    }
}

fn draw_footer(fb: &mut FrameBuffer, screen: Screen) {
    let hints = match screen {
        Screen::Register => "type your name · Enter: start · Esc: back · Ctrl-C: quit",
        Screen::Home => "↑↓ + Enter · 1-3: play · c: cards · b: board · p: player · q: quit",
        Screen::SystemMatch => "↑↓: card · ←→: system · Enter: place · u: unplace · c: check · Esc: home",
        Screen::BodyBuilder => "↑↓: organ · ←→: spot · Enter: place · Esc: home",
        Screen::Quiz => "1-4 or ↑↓ + Enter: answer · Enter: next · Esc: home",
        Screen::Results => "r: play again · Enter/Esc: home · c: cards",
        Screen::Collection => "Tab/←→: filter · ↑↓: card · Esc: home",
        Screen::Leaderboard => "Esc: home",
    };
    let y = fb.height().saturating_sub(1);
    fb.put_str(1, y, hints, muted());
}

fn draw_toasts<'a>(fb: &mut FrameBuffer, toasts: impl Iterator<Item = &'a Toast>) {
    let toasts: Vec<&Toast> = toasts.collect();
    let base = fb.height().saturating_sub(2 + toasts.len() as u16);
    for (i, toast) in toasts.iter().enumerate() {
        let color = match toast.severity {
            Severity::Info => Rgb::new(120, 170, 230),
            Severity::Success => GOOD,
            Severity::Error => BAD,
            Severity::Achievement => ACCENT,
        };
        let label = format!(" {} ", toast.text);
        let x = fb.width().saturating_sub(str_width(&label) + 1);
        fb.put_str(x, base + i as u16, &label, CellStyle::fg(Rgb::new(0, 0, 0)).on(color).bold());
    }
}

fn draw_register(fb: &mut FrameBuffer, view: &View<'_>, shell: &TerminalShell) {
    let mid = fb.height() / 2;
    fb.put_centered(mid.saturating_sub(4), "Welcome to Body Quest!", title());
    fb.put_centered(mid.saturating_sub(2), "Learn the human body one organ at a time.", muted());
    fb.put_centered(mid, "What's your name?", text());

    let w = 26;
    let x = fb.width().saturating_sub(w) / 2;
    fb.draw_box(x, mid + 1, w, 3, CellStyle::fg(ACCENT));
    let end = fb.put_str(x + 2, mid + 2, &shell.ui.name, text().bold());
    fb.put_str(end, mid + 2, "_", CellStyle::fg(ACCENT));

    if !view.roster.is_empty() {
        fb.put_centered(mid + 5, "Saved players (↑/↓, Enter with no name):", muted());
        let cursor = shell.ui.cursor.min(view.roster.len() - 1);
        for (i, profile) in view.roster.profiles().enumerate() {
            let selected = i == cursor;
            let marker = if selected { "▶" } else { " " };
            let line = format!("{marker} {}", profile.name);
            fb.put_str(x + 2, mid + 6 + i as u16, &line, highlighted(selected, muted()));
        }
    }
}

fn draw_home(fb: &mut FrameBuffer, view: &View<'_>, shell: &TerminalShell) {
    fb.put_str(2, 2, "Choose a game", title());
    for (i, item) in HOME_MENU.iter().enumerate() {
        let selected = i == shell.ui.cursor.min(HOME_MENU.len() - 1);
        let marker = if selected { "▶" } else { " " };
        let line = format!("{marker} {}. {item}", i + 1);
        fb.put_str(2, 4 + i as u16, &line, highlighted(selected, text()));
    }

    let Some(player) = view.player else {
        return;
    };
    let progress = view.collection_progress();
    let x = 32;
    fb.put_str(x, 2, "Your progress", title());
    let rows = [
        format!("Level     {} · {}", player.level(), player.level_title()),
        format!("Score     {}", player.total_score),
        format!("Cards     {}/{} ({}%)", progress.unlocked, progress.total, progress.percent()),
        format!("Badges    {}/{}", player.achievements.len(), Achievement::ALL.len()),
    ];
    for (i, row) in rows.iter().enumerate() {
        fb.put_str(x, 4 + i as u16, row, text());
    }
    let mut cx = x;
    for a in Achievement::ALL {
        let style = if player.has_achievement(a) { text() } else { muted().dim() };
        let icon = if player.has_achievement(a) { a.icon() } else { "·" };
        cx = fb.put_str(cx, 9, icon, style) + 1;
    }
}

fn draw_timer(fb: &mut FrameBuffer, y: u16, secs: u32) {
    let style = if secs <= 10 { CellStyle::fg(BAD).bold() } else { text().bold() };
    let label = format!("⏱ {secs}s");
    let x = fb.width().saturating_sub(str_width(&label) + 2);
    fb.put_str(x, y, &label, style);
}

fn draw_match(fb: &mut FrameBuffer, view: &View<'_>, round: &MatchRound, shell: &TerminalShell) {
    fb.put_str(2, 2, GameMode::SystemMatch.title(), title());
    draw_timer(fb, 2, round.time_left());

    let cursor = shell.ui.cursor.min(round.cards().len().saturating_sub(1));
    fb.put_str(2, 4, "Cards", text().bold());
    for (i, card) in round.cards().iter().enumerate() {
        let y = 5 + i as u16;
        let selected = i == cursor;
        let mut x = fb.put_str(2, y, if selected { "▶ " } else { "  " }, text());
        x = fb.put_str(x, y, &format!("{} {}", card.icon, card.name), highlighted(selected, text()));
        if let Some(system) = round.placement(&card.id) {
            let label = format!(" → {}", view.catalog.system_name(system));
            fb.put_str(x, y, &label, system_style(view, system));
        }
    }

    let zone = shell.ui.zone.min(round.systems().len().saturating_sub(1));
    let col_w = 24;
    let left = 36;
    for (i, system) in round.systems().iter().enumerate() {
        let x = left + i as u16 * (col_w + 1);
        let style = system_style(view, &system.id);
        let border = if i == zone { style.bold() } else { style.dim() };
        let h = 3 + round.cards().len() as u16;
        fb.draw_box(x, 4, col_w, h, border);
        fb.put_str(x + 1, 4, &format!(" {}. {} {} ", i + 1, system.icon, system.name), highlighted(i == zone, style));
        for (j, card) in round.cards_in(&system.id).enumerate() {
            fb.put_str(x + 2, 5 + j as u16, &format!("{} {}", card.icon, card.name), text());
        }
    }

    let placed = round.cards().len() - round.unplaced_cards().count();
    let status = format!("{placed}/{} placed", round.cards().len());
    let style = if round.can_check() { CellStyle::fg(GOOD).bold() } else { muted() };
    fb.put_str(2, 6 + round.cards().len() as u16, &status, style);
    if round.can_check() {
        fb.put_str(2, 7 + round.cards().len() as u16, "Press c to check!", CellStyle::fg(GOOD));
    }
}

/// Cards of `round` not yet placed, in deal order. The builder card cursor indexes this list.
pub fn builder_pool(round: &BuilderRound) -> Vec<usize> {
    round
        .cards()
        .iter()
        .enumerate()
        .filter(|(_, c)| !round.is_placed(&c.id))
        .map(|(i, _)| i)
        .collect()
}

fn draw_builder(fb: &mut FrameBuffer, view: &View<'_>, round: &BuilderRound, shell: &TerminalShell) {
    fb.put_str(2, 2, GameMode::BodyBuilder.title(), title());
    draw_timer(fb, 2, round.time_left());
    let status = format!("{}/{} organs placed", round.correct_count(), round.cards().len());
    fb.put_str(24, 2, &status, muted());

    // Body outline with one marker per zone.
    let (bx, by) = (2u16, 4u16);
    fb.draw_box(bx, by, BODY_W, BODY_H, muted());
    fb.put_str(bx + BODY_W / 2 - 1, by + 1, "( )", muted());
    let zone = shell.ui.zone.min(round.cards().len().saturating_sub(1));
    for (i, card) in round.cards().iter().enumerate() {
        let Some(pos) = &card.position else {
            continue;
        };
        let x = bx + 1 + ((pos.left.clamp(0.0, 100.0) / 100.0) * f32::from(BODY_W - 5)) as u16;
        let y = by + 1 + ((pos.top.clamp(0.0, 100.0) / 100.0) * f32::from(BODY_H - 3)) as u16;
        let style = system_style(view, &card.system);
        if round.is_placed(&card.id) {
            fb.put_str(x, y, &card.icon, style);
        } else {
            let marker = format!("[{}]", i + 1);
            fb.put_str(x, y, &marker, highlighted(i == zone, style.dim()));
        }
    }

    let x = bx + BODY_W + 3;
    fb.put_str(x, 4, "Organs", text().bold());
    let pool = builder_pool(round);
    let cursor = shell.ui.cursor.min(pool.len().saturating_sub(1));
    for (row, &i) in pool.iter().enumerate() {
        let card = &round.cards()[i];
        let selected = row == cursor;
        let line = format!("{} {} {}", if selected { "▶" } else { " " }, card.icon, card.name);
        fb.put_str(x, 5 + row as u16, &line, highlighted(selected, text()));
    }
    if let Some(card) = round.cards().get(zone).filter(|c| !round.is_placed(&c.id)) {
        let hint = format!("Spot [{}]: {}", zone + 1, view.catalog.system_name(&card.system));
        fb.put_str(x, 6 + pool.len() as u16, &hint, muted());
    }
}

fn hp_bar(hp: u32) -> String {
    let filled = (hp * 10 / QUIZ_START_HP.max(1)) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled.min(10)))
}

fn draw_quiz(fb: &mut FrameBuffer, round: &QuizRound, shell: &TerminalShell) {
    fb.put_str(2, 2, GameMode::Quiz.title(), title());
    draw_timer(fb, 2, round.time_left());

    let hp_style = if round.hp() <= 40 { CellStyle::fg(BAD) } else { CellStyle::fg(GOOD) };
    let x = fb.put_str(2, 3, &format!("HP {} ", hp_bar(round.hp())), hp_style);
    let stats = format!(
        " {}   🔥 {}   Score {}   Q {}/{}",
        round.hp(),
        round.streak(),
        round.score(),
        (round.index() + 1).min(round.questions().len()),
        round.questions().len()
    );
    fb.put_str(x, 3, &stats, text());

    let Some(question) = round.current() else {
        return;
    };
    let width = fb.width().saturating_sub(4).max(20) as usize;
    let mut y = 5;
    for line in wrap(&question.question, width) {
        fb.put_str(2, y, &line, text().bold());
        y += 1;
    }
    y += 1;

    let feedback = round.last_feedback().filter(|_| round.phase() == QuizPhase::Feedback);
    let cursor = shell.ui.cursor.min(question.options.len() - 1);
    for (i, option) in question.options.iter().enumerate() {
        let line = format!("{}. {option}", i + 1);
        let style = match feedback {
            Some(f) if i as u8 == f.correct_option => CellStyle::fg(GOOD).bold(),
            Some(f) if f.chosen == Some(i as u8) => CellStyle::fg(BAD),
            Some(_) => muted(),
            None => highlighted(i == cursor, text()),
        };
        let marker = if feedback.is_none() && i == cursor { "▶ " } else { "  " };
        let x = fb.put_str(2, y, marker, text());
        fb.put_str(x, y, &line, style);
        y += 1;
    }

    if let Some(feedback) = feedback {
        y += 1;
        let (verdict, style) = match (feedback.correct, feedback.chosen) {
            (true, _) => (format!("✅ Correct! +{}", feedback.points.total), CellStyle::fg(GOOD).bold()),
            (false, None) => (format!("⏰ Time's up! -{} HP", feedback.hp_lost), CellStyle::fg(BAD).bold()),
            (false, Some(_)) => (format!("❌ Not quite. -{} HP", feedback.hp_lost), CellStyle::fg(BAD).bold()),
        };
        fb.put_str(2, y, &verdict, style);
        y += 1;
        for line in wrap(&feedback.explanation, width) {
            fb.put_str(2, y, &line, muted());
            y += 1;
        }
        let last = round.index() + 1 >= round.questions().len() || round.hp() == 0;
        let next = if last { "Enter: see results" } else { "Enter: next question" };
        fb.put_str(2, y + 1, next, CellStyle::fg(ACCENT));
    }
}

fn draw_results(fb: &mut FrameBuffer, view: &View<'_>) {
    let Some(report) = view.report else {
        return;
    };
    let headline = format!("{} {}", report.headline.icon, report.headline.title);
    fb.put_centered(3, &headline, title());
    fb.put_centered(4, report.mode.title(), muted());

    let mut y = 6;
    let x = fb.width().saturating_sub(40) / 2;
    for stat in report.stats() {
        fb.put_str(x, y, stat.label, muted());
        fb.put_str(x + 20, y, &stat.value, text().bold());
        y += 1;
    }
    y += 1;
    let total = format!("Total score: {}", report.settlement.total_score);
    fb.put_str(x, y, &total, text());
    y += 2;

    if !report.cards.is_empty() {
        fb.put_str(x, y, "Cards earned", title());
        y += 1;
        for id in &report.cards {
            let Some(card) = view.catalog.card(id) else {
                continue;
            };
            let new = report.settlement.new_cards.contains(id);
            let line = format!("{} {} {}", card.icon, card.name, if new { "NEW!" } else { "" });
            fb.put_str(x + 2, y, &line, if new { CellStyle::fg(ACCENT) } else { text() });
            y += 1;
        }
        y += 1;
    }

    for a in &report.achievements {
        let new = report.settlement.new_achievements.contains(a);
        let line = format!("{} {}{}", a.icon(), a.title(), if new { "  NEW!" } else { "" });
        fb.put_str(x, y, &line, if new { CellStyle::fg(ACCENT).bold() } else { muted() });
        y += 1;
    }

    if let Some(fact) = &report.fun_fact {
        y += 1;
        fb.put_str(x, y, "💡 Did you know?", title());
        for line in wrap(fact, 60) {
            y += 1;
            fb.put_str(x, y, &line, text());
        }
    }
}

fn draw_collection(fb: &mut FrameBuffer, view: &View<'_>, shell: &TerminalShell) {
    fb.put_str(2, 2, "Card Collection", title());
    let progress = view.collection_progress();
    let summary = format!("{}/{} collected ({}%)", progress.unlocked, progress.total, progress.percent());
    fb.put_str(22, 2, &summary, muted());

    let mut x = fb.put_str(2, 3, "All", highlighted(*view.collection_filter == CollectionFilter::All, text()));
    for system in view.catalog.systems() {
        let active = *view.collection_filter == CollectionFilter::System(system.id.clone());
        x = fb.put_str(x + 2, 3, &format!("{} {}", system.icon, system.name), highlighted(active, system_style(view, &system.id)));
    }

    let entries = view.collection();
    let cursor = shell.ui.cursor.min(entries.len().saturating_sub(1));
    for (i, entry) in entries.iter().enumerate() {
        let y = 5 + i as u16;
        let selected = i == cursor;
        let line = if entry.unlocked {
            format!("{} {:<18} {}", entry.card.icon, entry.card.name, entry.card.rarity_stars())
        } else {
            "❓ ???".to_string()
        };
        let style = if entry.unlocked { text() } else { muted().dim() };
        let end = fb.put_str(2, y, &line, highlighted(selected, style));
        if let Some(system) = entry.system {
            fb.put_str(end + 2, y, &system.name, system_style(view, &system.id));
        }
    }

    if let Some(entry) = entries.get(cursor).filter(|e| e.unlocked) {
        let x = 50;
        let width = fb.width().saturating_sub(x + 2).max(20) as usize;
        fb.put_str(x, 5, &format!("{} {}", entry.card.icon, entry.card.name), title());
        let mut y = 7;
        for line in wrap(&entry.card.description, width) {
            fb.put_str(x, y, &line, text());
            y += 1;
        }
        y += 1;
        fb.put_str(x, y, "💡 Fun fact", muted());
        for line in wrap(&entry.card.fun_fact, width) {
            y += 1;
            fb.put_str(x, y, &line, text());
        }
    }
}

fn draw_leaderboard(fb: &mut FrameBuffer, view: &View<'_>) {
    fb.put_str(2, 2, "Leaderboard", title());
    fb.put_str(2, 4, "Rank  Player               Level  Score   Cards  Badges", muted());
    for (i, entry) in view.leaderboard().iter().enumerate() {
        let medal = match entry.rank {
            1 => "🥇",
            2 => "🥈",
            3 => "🥉",
            _ => "  ",
        };
        let line = format!(
            "{medal}{:>3}  {:<20} {:>5}  {:>6}  {:>5}  {:>6}",
            entry.rank, entry.name, entry.level, entry.score, entry.cards, entry.achievements
        );
        let style = if entry.is_current { CellStyle::fg(ACCENT).bold() } else { text() };
        fb.put_str(2, 5 + i as u16, &line, style);
    }
}

/// Greedy word wrap.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap("the quick brown fox", 9), vec!["the quick", "brown fox"]);
        assert_eq!(wrap("", 10), Vec::<String>::new());
        assert_eq!(wrap("unbreakableword", 4), vec!["unbreakableword"]);
    }

    #[test]
    fn hp_bar_scales() {
        assert_eq!(hp_bar(100), "██████████");
        assert_eq!(hp_bar(40), "████░░░░░░");
        assert_eq!(hp_bar(0), "░░░░░░░░░░");
    }
}
