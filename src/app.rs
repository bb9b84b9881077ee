use crate::calendar::ClosedHint;
use crate::help::Help;
use crate::picker::{CalendarStore, DatePicker, Navigation};
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, DefaultTerminal};
use std::io::{self, Write};

/// The host side of the picker: owns the shared store and turns key presses
/// into picker events, one at a time
#[derive(Debug)]
pub(crate) struct App<F> {
    picker: DatePicker<F>,
    store: CalendarStore,
    state: AppState,
}

impl<F: FnMut(&str)> App<F> {
    pub(crate) fn new(picker: DatePicker<F>, store: CalendarStore) -> App<F> {
        App {
            picker,
            store,
            state: AppState::Picking,
        }
    }

    pub(crate) fn run(mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw(&self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Picking => match key {
                KeyCode::Char('h') | KeyCode::Left => self.picker.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.picker.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.picker.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.picker.move_cursor(7),
                KeyCode::Char('p') | KeyCode::PageUp => self.navigate(Navigation::Prev),
                KeyCode::Char('n') | KeyCode::PageDown => self.navigate(Navigation::Next),
                KeyCode::Char('0') | KeyCode::Home => self.picker.jump_to_today(&mut self.store),
                KeyCode::Enter | KeyCode::Char(' ') => self.picker.select_cursor(&mut self.store),
                KeyCode::Char('o') => self.toggle_open(),
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn navigate(&mut self, nav: Navigation) -> bool {
        self.picker.is_open() && self.picker.navigate(nav, &mut self.store).is_ok()
    }

    fn toggle_open(&mut self) -> bool {
        let open = !self.picker.is_open();
        self.picker.set_open(open, &mut self.store).is_ok()
    }
}

impl<F: FnMut(&str)> Widget for &App<F> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        match self.picker.view(&self.store) {
            Some(view) => view.render(area, buf),
            None => ClosedHint(self.picker.lang()).render(area, buf),
        }
        if self.state == AppState::Helping {
            Help {
                lang: self.picker.lang(),
                style: BASE_STYLE,
            }
            .render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Lang;
    use std::sync::mpsc;
    use time::macros::date;

    type TestApp = App<Box<dyn FnMut(&str)>>;

    fn make_app(lang: Lang) -> (TestApp, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        let clicked: Box<dyn FnMut(&str)> = Box::new(move |date: &str| {
            tx.send(date.to_owned()).unwrap();
        });
        let mut picker = DatePicker::new(date!(2024 - 03 - 05), lang, clicked);
        let mut store = CalendarStore::new();
        picker.set_open(true, &mut store).unwrap();
        (App::new(picker, store), rx)
    }

    fn render_lines(app: &TestApp, area: Rect) -> Vec<String> {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn test_render() {
        let (app, _) = make_app(Lang::De);
        assert_eq!(
            render_lines(&app, Rect::new(0, 0, 59, 13)),
            [
                "                                                           ",
                "                         März 2024                         ",
                "           KW  Mo   Di   Mi   Do   Fr   Sa   So            ",
                "          ───────────────────────────────────────          ",
                "            9  26   27   28   29    1    2    3            ",
                "           10   4  [ 5]   6    7    8    9   10            ",
                "           11  11   12   13   14   15   16   17            ",
                "           12  18   19   20   21   22   23   24            ",
                "           13  25   26   27   28   29   30   31            ",
                "           14   1    2    3    4    5    6    7            ",
                "                                                           ",
                "          ? für Hilfe                                      ",
                "                                                           ",
            ]
        );
    }

    #[test]
    fn test_navigate_and_select() {
        let (mut app, rx) = make_app(Lang::En);
        assert!(app.handle_key(KeyCode::Char('n')));
        assert!(app.handle_key(KeyCode::Right));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(rx.try_recv().unwrap(), "2024-04-02");
        let state = app.store.get().unwrap();
        assert_eq!(state.title, "March 2024");
        assert_eq!(state.entry_month, time::Month::April);
        assert_eq!(state.selected_date.as_deref(), Some("04/02/2024"));
        let lines = render_lines(&app, Rect::new(0, 0, 39, 11));
        assert_eq!(lines[10], "Selected: 04/02/2024 (future)          ");
        assert!(app.handle_key(KeyCode::PageUp));
        assert!(app.handle_key(KeyCode::PageUp));
        assert_eq!(app.store.get().unwrap().title, "February 2024");
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(app.store.get().unwrap().title, "March 2024");
    }

    #[test]
    fn test_cursor_stops_at_grid_edge() {
        let (mut app, _) = make_app(Lang::De);
        assert!(app.handle_key(KeyCode::Up));
        assert!(!app.handle_key(KeyCode::Up));
        assert!(app.handle_key(KeyCode::Char('h')));
        assert!(!app.handle_key(KeyCode::Char('h')));
    }

    #[test]
    fn test_close_and_reopen() {
        let (mut app, rx) = make_app(Lang::En);
        assert!(app.handle_key(KeyCode::Char('o')));
        assert!(app.store.get().is_none());
        assert!(!app.handle_key(KeyCode::Char('n')));
        assert!(!app.handle_key(KeyCode::Enter));
        assert!(!app.handle_key(KeyCode::Down));
        assert!(!app.handle_key(KeyCode::Home));
        assert!(rx.try_recv().is_err());
        let lines = render_lines(&app, Rect::new(0, 0, 40, 3));
        assert_eq!(lines[1], "    Calendar closed, press o to open    ");
        assert!(app.handle_key(KeyCode::Char('o')));
        assert_eq!(app.store.get().unwrap().title, "March 2024");
    }

    #[test]
    fn test_help() {
        let (mut app, _) = make_app(Lang::De);
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        let lines = render_lines(&app, Rect::new(0, 0, 59, 21));
        assert!(lines.iter().any(|l| l.contains(" Tastenbelegung ")));
        assert!(lines.iter().any(|l| l.contains("Nächster Monat")));
        // Any key dismisses the help without acting on it:
        assert!(app.handle_key(KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Picking);
        assert_eq!(app.store.get().unwrap().title, "März 2024");
    }

    #[test]
    fn test_quit() {
        let (mut app, _) = make_app(Lang::De);
        assert!(!app.quitting());
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
        assert!(!app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn test_invalid_key() {
        let (mut app, _) = make_app(Lang::De);
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(!app.handle_key(KeyCode::Tab));
    }
}
