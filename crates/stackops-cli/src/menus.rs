//! Menu tree composition.
//!
//! Menus are built fresh for every display: a submenu action constructs its
//! `Menu` inside the closure, so no menu instance outlives one interactive
//! loop. Leaf actions wrap a prompt in `run_prompt`; the prompt's own result
//! is irrelevant to the menu engine.

use stackops_core::php::InstallExtensionPrompt;
use stackops_core::ssl::prompts::{CheckSslPrompt, EditSslPrompt, InstallSslPrompt};
use stackops_core::ui::console::Console;
use stackops_core::website::prompts::{ListWebsitesPrompt, WebsiteInfoPrompt};
use stackops_core::{run_prompt, Action, Env, Menu, MenuItem, OpsError, Prompt, BACK_ID};

pub fn main_menu(env: &Env) -> Menu {
    Menu::new(
        "🔧 stackops - select a feature:",
        vec![
            MenuItem::new("1", "🌐 Website management", submenu(env, website_menu)),
            MenuItem::new("2", "🔐 SSL certificates", submenu(env, ssl_menu)),
            MenuItem::new("3", "🐘 PHP extensions", submenu(env, php_menu)),
            MenuItem::new(BACK_ID, "Exit", noop()),
        ],
    )
}

fn website_menu(env: &Env) -> Menu {
    Menu::with_back(
        "🌐 Website management:",
        vec![
            MenuItem::new("1", "List websites", prompt_action(env, ListWebsitesPrompt::new)),
            MenuItem::new("2", "Website info", prompt_action(env, WebsiteInfoPrompt::new)),
        ],
    )
}

fn ssl_menu(env: &Env) -> Menu {
    Menu::with_back(
        "🔐 SSL certificate management:",
        vec![
            MenuItem::new("1", "Check certificate", prompt_action(env, CheckSslPrompt::new)),
            MenuItem::new(
                "2",
                "Install custom certificate",
                prompt_action(env, InstallSslPrompt::new),
            ),
            MenuItem::new("3", "Edit certificate", prompt_action(env, EditSslPrompt::new)),
        ],
    )
}

fn php_menu(env: &Env) -> Menu {
    Menu::with_back(
        "🐘 PHP extension management:",
        vec![MenuItem::new(
            "1",
            "Install extension",
            prompt_action(env, InstallExtensionPrompt::new),
        )],
    )
}

fn noop() -> impl Action {
    |_: &mut dyn Console| -> Result<(), OpsError> { Ok(()) }
}

/// Action that opens a freshly built submenu.
fn submenu(env: &Env, build: fn(&Env) -> Menu) -> impl Action {
    let env = env.clone();
    move |console: &mut dyn Console| -> Result<(), OpsError> {
        build(&env).display(console);
        Ok(())
    }
}

/// Action that runs one single-use prompt instance per invocation.
fn prompt_action<P, F>(env: &Env, make: F) -> impl Action
where
    P: Prompt,
    F: Fn(Env) -> P + 'static,
{
    let env = env.clone();
    move |console: &mut dyn Console| -> Result<(), OpsError> {
        let mut prompt = make(env.clone());
        run_prompt(&mut prompt, console);
        Ok(())
    }
}
