//! Menu navigation loop.
//!
//! A `Menu` owns an ordered list of items and runs an unbounded interactive
//! loop: render the labels, block for one selection, dispatch the chosen
//! item's action, wait for acknowledgment, repeat. The loop terminates on the
//! reserved back item, on a cancel signal during selection, or defensively on
//! a selection that matches no item. Action failures are caught, shown, and
//! survived; nothing escapes `display`.

use crate::errors::OpsError;
use crate::ui::console::Console;

/// Reserved identifier of the back item. Menus built through
/// [`Menu::with_back`] always carry exactly one item with this id, last.
pub const BACK_ID: &str = "0";

/// A unit of work bound to a menu item. The engine only cares whether it
/// raised; any produced value is the action's own business.
pub trait Action {
    fn invoke(&mut self, console: &mut dyn Console) -> Result<(), OpsError>;
}

impl<F> Action for F
where
    F: FnMut(&mut dyn Console) -> Result<(), OpsError>,
{
    fn invoke(&mut self, console: &mut dyn Console) -> Result<(), OpsError> {
        self(console)
    }
}

pub struct MenuItem {
    pub id: String,
    pub label: String,
    action: Box<dyn Action>,
}

impl MenuItem {
    pub fn new(id: &str, label: &str, action: impl Action + 'static) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            action: Box::new(action),
        }
    }

    /// Display form: the back item is rendered distinctly.
    fn render(&self) -> String {
        if self.id == BACK_ID {
            format!("⏎ {}", self.label)
        } else {
            format!("[{}] {}", self.id, self.label)
        }
    }
}

pub struct Menu {
    pub title: String,
    items: Vec<MenuItem>,
    back_id: String,
}

impl Menu {
    pub fn new(title: &str, items: Vec<MenuItem>) -> Self {
        Self {
            title: title.to_string(),
            items,
            back_id: BACK_ID.to_string(),
        }
    }

    /// Build a menu from items that carry no back entry, appending the
    /// canonical no-op Back item so the menu is always exitable.
    pub fn with_back(title: &str, mut items: Vec<MenuItem>) -> Self {
        items.push(MenuItem::new(
            BACK_ID,
            "Back",
            |_: &mut dyn Console| -> Result<(), OpsError> { Ok(()) },
        ));
        Self::new(title, items)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Run the interactive loop until the user backs out or cancels.
    pub fn display(&mut self, console: &mut dyn Console) {
        loop {
            let choices: Vec<String> = self.items.iter().map(MenuItem::render).collect();

            let answer = match console.select(&self.title, &choices) {
                Ok(Some(answer)) => answer,
                Ok(None) => {
                    log::debug!("menu '{}' dismissed by user", self.title);
                    return;
                }
                Err(OpsError::Interrupted) => {
                    log::debug!("menu '{}' interrupted during selection", self.title);
                    return;
                }
                Err(err) => {
                    log::error!("selection failed in menu '{}': {}", self.title, err);
                    return;
                }
            };

            let position = self
                .items
                .iter()
                .position(|item| item.render() == answer);
            let Some(idx) = position else {
                log::warn!(
                    "selection '{}' matches no item in menu '{}'",
                    answer,
                    self.title
                );
                return;
            };

            if self.items[idx].id == self.back_id {
                return;
            }

            let label = self.items[idx].label.clone();
            console.line(&format!("👉 You chose: {}", label));
            if let Err(err) = self.items[idx].action.invoke(console) {
                log::error!("menu action '{}' failed: {}", label, err);
                console.line(&format!("❌ {}", err));
            }

            // Keep the action's output visible before the next render. An
            // interrupt here still redisplays; the user exits via Back.
            if let Err(err) = console.pause() {
                if !err.is_interrupted() {
                    log::error!("acknowledgment wait failed: {}", err);
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{counting_action, failing_action, ScriptedConsole, SelectReply};
    use std::cell::Cell;
    use std::rc::Rc;

    fn item(id: &str, label: &str, counter: &Rc<Cell<usize>>) -> MenuItem {
        MenuItem::new(id, label, counting_action(counter))
    }

    #[test]
    fn test_with_back_appends_single_back_item_last() {
        let counter = Rc::new(Cell::new(0));
        let menu = Menu::with_back(
            "Main",
            vec![item("1", "Edit", &counter), item("2", "Check", &counter)],
        );
        let backs: Vec<_> = menu.items().iter().filter(|i| i.id == BACK_ID).collect();
        assert_eq!(backs.len(), 1);
        assert_eq!(menu.items().last().unwrap().id, BACK_ID);
        assert_eq!(menu.items().last().unwrap().label, "Back");
    }

    #[test]
    fn test_back_item_renders_with_return_prefix() {
        let counter = Rc::new(Cell::new(0));
        let menu = Menu::with_back("Main", vec![item("1", "Edit", &counter)]);
        assert_eq!(menu.items()[0].render(), "[1] Edit");
        assert_eq!(menu.items()[1].render(), "⏎ Back");
    }

    #[test]
    fn test_selecting_back_exits_without_invoking_any_action() {
        let counter = Rc::new(Cell::new(0));
        let back_counter = Rc::new(Cell::new(0));
        let mut menu = Menu::new(
            "Main",
            vec![item("1", "Edit", &counter), item(BACK_ID, "Back", &back_counter)],
        );
        let mut console = ScriptedConsole::new();
        console.push_select(SelectReply::Choice("⏎ Back".to_string()));

        menu.display(&mut console);
        assert_eq!(counter.get(), 0);
        assert_eq!(back_counter.get(), 0);
    }

    #[test]
    fn test_repeated_selection_invokes_action_each_time() {
        let counter = Rc::new(Cell::new(0));
        let mut menu = Menu::with_back("Main", vec![item("1", "Edit", &counter)]);
        let mut console = ScriptedConsole::new();
        for _ in 0..3 {
            console.push_select(SelectReply::Choice("[1] Edit".to_string()));
        }
        console.push_select(SelectReply::Choice("⏎ Back".to_string()));

        menu.display(&mut console);
        assert_eq!(counter.get(), 3);
        assert_eq!(console.pauses(), 3);
    }

    #[test]
    fn test_selection_is_echoed_before_action_runs() {
        let counter = Rc::new(Cell::new(0));
        let mut menu = Menu::with_back("Main", vec![item("1", "Edit", &counter)]);
        let mut console = ScriptedConsole::new();
        console.push_select(SelectReply::Choice("[1] Edit".to_string()));
        console.push_select(SelectReply::Choice("⏎ Back".to_string()));

        menu.display(&mut console);
        assert_eq!(counter.get(), 1);
        assert!(console.printed("👉 You chose: Edit"));
    }

    #[test]
    fn test_cancel_during_selection_exits_with_no_invocations() {
        let counter = Rc::new(Cell::new(0));
        let mut menu = Menu::with_back("Main", vec![item("1", "Edit", &counter)]);
        let mut console = ScriptedConsole::new();
        console.push_select(SelectReply::Cancelled);

        menu.display(&mut console);
        assert_eq!(counter.get(), 0);
        assert_eq!(console.pauses(), 0);
    }

    #[test]
    fn test_unrecognized_selection_exits_defensively() {
        let counter = Rc::new(Cell::new(0));
        let mut menu = Menu::with_back("Main", vec![item("1", "Edit", &counter)]);
        let mut console = ScriptedConsole::new();
        console.push_select(SelectReply::Choice("[9] Bogus".to_string()));

        menu.display(&mut console);
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_action_failure_is_shown_and_loop_survives() {
        let counter = Rc::new(Cell::new(0));
        let mut menu = Menu::with_back(
            "Main",
            vec![
                MenuItem::new("1", "Break", failing_action("disk on fire")),
                item("2", "Edit", &counter),
            ],
        );
        let mut console = ScriptedConsole::new();
        console.push_select(SelectReply::Choice("[1] Break".to_string()));
        console.push_select(SelectReply::Choice("[2] Edit".to_string()));
        console.push_select(SelectReply::Choice("⏎ Back".to_string()));

        menu.display(&mut console);
        // The failure was displayed and the loop kept going.
        assert!(console.printed("disk on fire"));
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn test_interrupt_during_pause_still_redisplays() {
        let counter = Rc::new(Cell::new(0));
        let mut menu = Menu::with_back("Main", vec![item("1", "Edit", &counter)]);
        let mut console = ScriptedConsole::new();
        console.push_select(SelectReply::Choice("[1] Edit".to_string()));
        console.interrupt_next_pause();
        console.push_select(SelectReply::Choice("⏎ Back".to_string()));

        menu.display(&mut console);
        assert_eq!(counter.get(), 1);
    }
}
