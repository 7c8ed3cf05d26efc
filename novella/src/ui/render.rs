//! Render gateway for the terminal front end.
//!
//! Pure view code: reads the session state and draws the screen it calls
//! for. The image slot is a labeled placeholder box; terminals don't get
//! pixel art.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use novella_core::{Popup, Screen, StorySession};

use crate::ui::theme::Theme;

/// Dialogue box height in rows, image area takes the rest.
const DIALOGUE_BOX_HEIGHT: u16 = 9;

/// Main render dispatch.
pub fn render(frame: &mut Frame, session: &StorySession, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    match session.flow().screen {
        Screen::LanguageMenu => render_language_menu(frame, session, theme, area),
        Screen::MainMenu => render_main_menu(frame, session, theme, area),
        Screen::About => render_static_screen(frame, session, theme, area, true),
        Screen::Help => render_static_screen(frame, session, theme, area, false),
        Screen::Dialogue => render_dialogue(frame, session, theme, area),
        Screen::Choice => render_choices(frame, session, theme, area),
        Screen::Terminated => {}
    }

    if let Some(popup) = &session.flow().popup {
        render_popup(frame, popup, theme, area);
    }
}

/// Language selection list shown before anything else.
fn render_language_menu(frame: &mut Frame, session: &StorySession, theme: &Theme, area: Rect) {
    let names: Vec<&str> = session
        .flow()
        .languages()
        .iter()
        .map(|l| l.name.as_str())
        .collect();
    render_menu(
        frame,
        theme,
        area,
        &session.config().caption,
        &names,
        session.flow().active_index,
    );
}

fn render_main_menu(frame: &mut Frame, session: &StorySession, theme: &Theme, area: Rect) {
    let items: Vec<&str> = session.menu_items().iter().map(String::as_str).collect();
    render_menu(
        frame,
        theme,
        area,
        &session.config().caption,
        &items,
        session.flow().active_index,
    );
}

/// A vertically centered list with the active entry highlighted.
fn render_menu(
    frame: &mut Frame,
    theme: &Theme,
    area: Rect,
    title: &str,
    items: &[&str],
    active_index: usize,
) {
    let mut lines = vec![
        Line::from(Span::styled(title.to_string(), theme.title_style())),
        Line::from(""),
    ];
    for (i, item) in items.iter().enumerate() {
        let marker = if i == active_index { "> " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{marker}{item}"),
            theme.item_style(i == active_index),
        )));
    }

    let height = lines.len() as u16;
    let [_, centered, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered,
    );
}

/// About and Help: a title and a wrapped body, Escape to leave.
fn render_static_screen(
    frame: &mut Frame,
    session: &StorySession,
    theme: &Theme,
    area: Rect,
    about: bool,
) {
    let language = session.flow().language_code();
    let text = if about {
        session.texts().about(language)
    } else {
        session.texts().help(language)
    };
    let Some(text) = text else {
        return;
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", text.title), theme.title_style()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    let body = Paragraph::new(text.body.as_str())
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: true })
        .block(block);

    let [content, footer] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
    frame.render_widget(body, content);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Esc: back",
            Style::default().fg(theme.hint),
        )))
        .alignment(Alignment::Right),
        footer,
    );
}

fn render_dialogue(frame: &mut Frame, session: &StorySession, theme: &Theme, area: Rect) {
    let Some(scene) = session.current_scene() else {
        return;
    };

    let [image_area, box_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(DIALOGUE_BOX_HEIGHT),
    ])
    .areas(area);

    render_image_placeholder(frame, session, theme, image_area);

    let title = if scene.character_name.is_empty() {
        String::new()
    } else {
        format!(" {} ", scene.character_name)
    };
    let block = Block::default()
        .title(Span::styled(title, theme.title_style()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    let mut lines = vec![Line::from(Span::styled(
        scene.description.clone(),
        Style::default().fg(theme.text),
    ))];
    lines.push(Line::from(""));
    lines.push(hint_line(session, theme, "Enter: continue"));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        box_area,
    );
}

fn render_choices(frame: &mut Frame, session: &StorySession, theme: &Theme, area: Rect) {
    let [image_area, box_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(DIALOGUE_BOX_HEIGHT),
    ])
    .areas(area);

    render_image_placeholder(frame, session, theme, image_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    let active = session.flow().active_index;
    let mut lines = Vec::new();
    for (i, choice) in session.current_choices().iter().enumerate() {
        let marker = if i == active { "> " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{marker}{}", choice.label),
            theme.item_style(i == active),
        )));
    }
    lines.push(Line::from(""));
    lines.push(hint_line(session, theme, "Enter: choose"));

    frame.render_widget(Paragraph::new(lines).block(block), box_area);
}

/// The scene's image slot: a bordered box naming the asset.
fn render_image_placeholder(
    frame: &mut Frame,
    session: &StorySession,
    theme: &Theme,
    area: Rect,
) {
    let placeholder = &session.config().placeholder_image;
    let image = session
        .current_scene()
        .and_then(|s| s.image.as_deref())
        .unwrap_or(placeholder);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    let [_, centered, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(block.inner(area));

    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("[ {image} ]"),
            Style::default().fg(theme.hint),
        )))
        .alignment(Alignment::Center),
        centered,
    );
}

/// Footer line combining the translated exit/save hints with a screen
/// specific action hint.
fn hint_line<'a>(session: &StorySession, theme: &Theme, action: &'a str) -> Line<'a> {
    let language = session.flow().language_code();
    let (exit, save) = session
        .texts()
        .hints(language)
        .map(|(e, s)| (e.as_str(), s.as_str()))
        .unwrap_or(("Exit now", "Save"));

    Line::from(Span::styled(
        format!("{action} | S: {save} | Esc: {exit}"),
        Style::default().fg(theme.hint),
    ))
}

/// Transient notice drawn over whatever screen is up.
fn render_popup(frame: &mut Frame, popup: &Popup, theme: &Theme, area: Rect) {
    let width = (popup.message.len() as u16 + 6).min(area.width);
    let popup_area = centered_rect(width, 5, area);

    let accent = if popup.kind.is_error() {
        theme.popup_error
    } else {
        theme.popup_success
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            popup.message.clone(),
            Style::default().fg(accent),
        )))
        .alignment(Alignment::Center)
        .block(block),
        popup_area,
    );
}

/// A fixed-size rect centered in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, centered, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(mid);
    centered
}
