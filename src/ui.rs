//! Terminal drawing - renders a `RenderState`, never mutates anything

use ratatui::{prelude::*, widgets::*};

use crate::app::log::{LogEntry, LogKind};
use crate::constants::{APP_NAME, APP_VERSION};
use crate::messages::ui_events::{AuthMode, Focus, InputMode};
use crate::messages::RenderState;
use crate::money::format_minor_units;

pub fn draw(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, chunks[0]);

    if state.logged_in() {
        draw_session(f, state, chunks[1]);
    } else {
        draw_auth(f, state, chunks[1]);
    }

    draw_status_bar(f, state, chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} v{} ", APP_NAME, APP_VERSION),
        Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
    )];

    if let Some(user) = &state.user {
        spans.push(Span::raw(" User: "));
        spans.push(Span::styled(user.username.clone(), Style::default().bold()));
    }
    if state.is_loading {
        spans.push(Span::styled(" [...]", Style::default().fg(Color::Yellow)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_auth(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Auth form
            Constraint::Min(5),    // Log
        ])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.auth_mode.title()))
        .title_style(Style::default().fg(Color::Cyan).bold());
    let inner = block.inner(chunks[0]);
    f.render_widget(block, chunks[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    draw_text_field(f, state, rows[0], Focus::Username, " Username ", &state.username);
    let masked = "*".repeat(state.password_len);
    draw_text_field(f, state, rows[1], Focus::Password, " Password ", &masked);

    let hint = match state.auth_mode {
        AuthMode::Login => "No account? Press 'r' to register",
        AuthMode::Register => "Already registered? Press 'r' to sign in",
    };
    f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::Blue)),
        rows[2],
    );

    draw_log(f, state, chunks[1]);
}

fn draw_session(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(14), // Forms + accounts
            Constraint::Min(5),     // Log
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    let forms = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Create account
            Constraint::Length(1), // Transfer heading
            Constraint::Length(3), // From
            Constraint::Length(3), // To
            Constraint::Length(3), // Amount
        ])
        .split(columns[0]);

    draw_text_field(
        f,
        state,
        forms[0],
        Focus::InitialBalance,
        " 1. New account - initial balance ",
        &state.initial_balance,
    );

    f.render_widget(
        Paragraph::new(" 2. Transfer").style(Style::default().bold()),
        forms[1],
    );
    draw_transfer_source(f, state, forms[2]);
    draw_text_field(f, state, forms[3], Focus::TransferTo, " To account ", &state.transfer_to);
    draw_text_field(
        f,
        state,
        forms[4],
        Focus::TransferAmount,
        " Amount ",
        &state.transfer_amount,
    );

    draw_accounts(f, state, columns[1]);
    draw_log(f, state, chunks[1]);
}

fn draw_transfer_source(f: &mut Frame, state: &RenderState, area: Rect) {
    let content = if state.transfer_from.is_empty() {
        Span::styled("<Enter / arrows to choose>", Style::default().fg(Color::DarkGray))
    } else {
        let balance = state
            .accounts
            .iter()
            .find(|a| a.account_number == state.transfer_from)
            .map(|a| format!(" - balance {} {}", format_minor_units(a.balance), state.currency_label))
            .unwrap_or_default();
        Span::raw(format!("{}{}", state.transfer_from, balance))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state, Focus::TransferFrom))
        .title(" From account ");
    f.render_widget(Paragraph::new(Line::from(content)).block(block), area);
}

fn draw_accounts(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state, Focus::Accounts))
        .title(" 3. My accounts (d:delete) ");

    if state.accounts.is_empty() {
        let empty = Paragraph::new("You have no accounts yet. Create your first one!")
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .accounts
        .iter()
        .map(|a| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<20}", a.account_number), Style::default().fg(Color::Cyan)),
                Span::raw(format!(" {} {}", format_minor_units(a.balance), state.currency_label)),
            ]))
        })
        .collect();

    let highlight_style = if state.focus == Focus::Accounts {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_account));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_log(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state, Focus::Log))
        .title(" Operation log ");

    let lines: Vec<Line> = state.log.iter().map(log_line).collect();
    let log = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.log_scroll, 0));
    f.render_widget(log, area);
}

fn log_line(entry: &LogEntry) -> Line<'static> {
    Line::from(Span::styled(
        format!("> {}", entry.display_line()),
        Style::default().fg(kind_color(entry.kind)),
    ))
}

fn draw_text_field(f: &mut Frame, state: &RenderState, area: Rect, focus: Focus, title: &str, content: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state, focus))
        .title(title.to_string());
    f.render_widget(Paragraph::new(content.to_string()).block(block), area);

    if state.focus == focus && state.input_mode == InputMode::Editing {
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + state.cursor_position as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn border_style(state: &RenderState, focus: Focus) -> Style {
    if state.focus != focus {
        Style::default()
    } else if state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.input_mode == InputMode::Editing {
        " ESC:stop editing | Enter:submit | Tab:next field "
    } else if state.logged_in() {
        " Tab:field | e:edit | s:submit | d:delete | x:logout | ?:help | q:quit "
    } else {
        " Tab:field | e:edit | s:submit | r:login/register | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 P2P TRANSFERS - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Next / previous field
   ↑ / ↓              Select account, scroll log,
                      choose transfer source

 FORMS
   e / Enter          Edit focused field
   Enter (editing)    Submit the form
   s                  Submit the form
   Esc                Stop editing

 SESSION
   r                  Switch sign-in / registration
   d                  Delete selected account
   x                  Sign out

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Amounts are entered in major units with up to
 two decimals, e.g. 125.50

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

/// Log entry color
pub fn kind_color(kind: LogKind) -> Color {
    match kind {
        LogKind::Success => Color::Green,
        LogKind::Error => Color::Red,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, User};
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_auth_screen_masks_password() {
        let state = RenderState {
            username: "alice".into(),
            password_len: 6,
            ..RenderState::default()
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Sign in"));
        assert!(text.contains("alice"));
        assert!(text.contains("******"));
    }

    #[test]
    fn test_session_screen_shows_balances_in_major_units() {
        let state = RenderState {
            user: Some(User {
                user_id: 1,
                username: "alice".into(),
            }),
            accounts: vec![Account {
                id: 1,
                account_number: "40817810".into(),
                balance: 123_456,
                user_id: Some(1),
            }],
            focus: Focus::InitialBalance,
            ..RenderState::default()
        };
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("40817810"));
        assert!(text.contains("1234.56 RUB"));
    }
}
