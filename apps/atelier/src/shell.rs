//! # Shell
//!
//! The line-oriented front end. Each input line is one command; toasts
//! raised by the command are printed after its output.
//!
//! ```text
//! atelier> set button.radius 20
//! {
//!   "typography": { ... },
//!   "button": { "radius": 20, ... },
//!   ...
//! }
//! undo: yes  redo: no
//! atelier> undo
//! ...
//! » Undid change
//! atelier> add
//! added 5d1c0e2a
//! » Added to cart
//! ```
//!
//! ## Words
//! | Word                          | Command                              |
//! |-------------------------------|--------------------------------------|
//! | `show`                        | current configuration                |
//! | `set <path> <json>`           | set one field (`button.radius 20`)   |
//! | `undo`, `redo` (`^z`, `^y`)   | history                              |
//! | `reset`, `confirm`, `cancel`  | reset with confirmation              |
//! | `import <file>`               | import a JSON file                   |
//! | `drop <mime> <file>`          | import a dropped file                |
//! | `paste <json>`                | import JSON text                     |
//! | `export`                      | write `ui-config.json`               |
//! | `share`, `css`                | copy share URL / CSS variables       |
//! | `url`, `vars`                 | show page URL / preview variables    |
//! | `chair`, `customize <f> <v>`  | chair picker                         |
//! | `add [preview]`               | add the configured chair             |
//! | `cart`, `qty <key> <n>`       | cart drawer                          |
//! | `remove <key>`, `clear`       |                                      |
//! | `toasts`, `dismiss <id>`      | notices                              |
//! | `help`, `quit`                |                                      |

use std::path::PathBuf;
use std::sync::Arc;

use atelier_core::{style, Choice, LineItem};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::error::TryRecvError;
use tracing::debug;
use uuid::Uuid;

use crate::clipboard::Clipboard;
use crate::commands::cart::CartResponse;
use crate::commands::config::ConfigResponse;
use crate::commands::customize::CustomizerResponse;
use crate::commands::{cart, config, customize, transfer};
use crate::error::{ApiError, ApiResult};
use crate::state::{
    CartState, ConfigState, CustomizerState, DbState, ResetState, ToastEvent, ToastState, UrlState,
};

const PROMPT: &str = "atelier> ";

const HELP: &str = "\
show                        current configuration
set <path> <json>           set one field, e.g. `set button.radius 20`
undo | redo                 step through history (also ^z, ^y, ^shift+z)
reset | confirm | cancel    reset to defaults, with confirmation
import <file>               import a JSON file
drop <mime> <file>          import a dropped file (JSON types only)
paste <json>                import JSON text
export                      write ui-config.json
share | css                 copy the share URL / the CSS variable block
url | vars                  show the page URL / the preview variables
chair                       chair picker state and price
customize <field> <value>   material, cushion, arms, armcolor, piping, legs
add [preview]               add the configured chair to the cart
cart                        cart lines and totals
qty <key> <n>               set a line's quantity
remove <key> | clear        remove a line / empty the cart
toasts | dismiss <id>       notices on screen / dismiss one
quit                        leave";

// =============================================================================
// Parsing
// =============================================================================

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Show,
    Set { path: String, value: Value },
    Undo,
    Redo,
    Reset,
    Confirm,
    Cancel,
    Import(PathBuf),
    Drop { mime: String, path: PathBuf },
    Paste(String),
    Export,
    Share,
    Css,
    Url,
    Vars,
    Chair,
    Customize { field: String, value: String },
    Add { preview: Option<String> },
    Cart,
    Qty { key: String, input: String },
    Remove(String),
    Clear,
    Toasts,
    Dismiss(Uuid),
    Help,
    Quit,
}

impl ShellCommand {
    /// Parses one line. Blank lines are `Ok(None)`.
    pub fn parse(line: &str) -> ApiResult<Option<ShellCommand>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word.to_ascii_lowercase().as_str() {
            "show" | "config" => ShellCommand::Show,
            "set" => {
                let (path, raw) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| usage("set <path> <json>"))?;
                ShellCommand::Set {
                    path: path.to_string(),
                    value: parse_value(raw.trim()),
                }
            }
            "undo" | "^z" | "ctrl+z" | "cmd+z" => ShellCommand::Undo,
            "redo" | "^y" | "ctrl+y" | "cmd+y" | "^shift+z" | "ctrl+shift+z" | "cmd+shift+z" => {
                ShellCommand::Redo
            }
            "reset" => ShellCommand::Reset,
            "confirm" => ShellCommand::Confirm,
            "cancel" => ShellCommand::Cancel,
            "import" => ShellCommand::Import(PathBuf::from(required(rest, "import <file>")?)),
            "drop" => match args.as_slice() {
                [mime, _, ..] => ShellCommand::Drop {
                    mime: mime.to_string(),
                    path: PathBuf::from(rest[mime.len()..].trim()),
                },
                _ => return Err(usage("drop <mime> <file>")),
            },
            "paste" => ShellCommand::Paste(required(rest, "paste <json>")?.to_string()),
            "export" => ShellCommand::Export,
            "share" => ShellCommand::Share,
            "css" => ShellCommand::Css,
            "url" => ShellCommand::Url,
            "vars" => ShellCommand::Vars,
            "chair" => ShellCommand::Chair,
            "customize" => match args.as_slice() {
                [field, value] => ShellCommand::Customize {
                    field: field.to_string(),
                    value: value.to_string(),
                },
                _ => return Err(usage("customize <field> <value>")),
            },
            "add" => ShellCommand::Add {
                preview: (!rest.is_empty()).then(|| rest.to_string()),
            },
            "cart" => ShellCommand::Cart,
            "qty" => match args.as_slice() {
                [key, input] => ShellCommand::Qty {
                    key: key.to_string(),
                    input: input.to_string(),
                },
                _ => return Err(usage("qty <key> <n>")),
            },
            "remove" => ShellCommand::Remove(required(rest, "remove <key>")?.to_string()),
            "clear" => ShellCommand::Clear,
            "toasts" => ShellCommand::Toasts,
            "dismiss" => {
                let id = required(rest, "dismiss <id>")?;
                let id = Uuid::parse_str(id)
                    .map_err(|_| ApiError::validation(format!("'{id}' is not a toast id")))?;
                ShellCommand::Dismiss(id)
            }
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => {
                return Err(ApiError::validation(format!(
                    "Unknown command '{other}', try `help`"
                )))
            }
        };
        Ok(Some(command))
    }
}

/// JSON when it parses, otherwise the raw text as a string, so
/// `set button.bg #ff0000` works without quotes.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn required<'a>(rest: &'a str, form: &str) -> ApiResult<&'a str> {
    if rest.is_empty() {
        Err(usage(form))
    } else {
        Ok(rest)
    }
}

fn usage(form: &str) -> ApiError {
    ApiError::validation(format!("usage: {form}"))
}

// =============================================================================
// Shell
// =============================================================================

/// What the loop does after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// The session: every state handle plus the outside world (clipboard,
/// export directory).
pub struct Shell {
    db: DbState,
    config: ConfigState,
    cart: CartState,
    customizer: CustomizerState,
    toasts: ToastState,
    reset: ResetState,
    url: UrlState,
    clipboard: Arc<dyn Clipboard>,
    export_dir: PathBuf,
}

impl Shell {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: DbState,
        config: ConfigState,
        cart: CartState,
        customizer: CustomizerState,
        toasts: ToastState,
        url: UrlState,
        clipboard: Arc<dyn Clipboard>,
        export_dir: PathBuf,
    ) -> Self {
        Shell {
            db,
            config,
            cart,
            customizer,
            toasts,
            reset: ResetState::new(),
            url,
            clipboard,
            export_dir,
        }
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn toasts(&self) -> &ToastState {
        &self.toasts
    }

    pub fn url(&self) -> &UrlState {
        &self.url
    }

    /// Runs one line.
    pub async fn execute(&self, line: &str) -> Outcome {
        let command = match ShellCommand::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Outcome::Continue(String::new()),
            Err(e) => return Outcome::Continue(format!("error: {}", e.message)),
        };
        debug!(command = ?command, "Shell command");

        if command == ShellCommand::Quit {
            return Outcome::Quit;
        }
        match self.dispatch(command).await {
            Ok(text) => Outcome::Continue(text),
            Err(e) => Outcome::Continue(format!("error: {}", e.message)),
        }
    }

    async fn dispatch(&self, command: ShellCommand) -> ApiResult<String> {
        let (db, cfg, url, toasts) = (&self.db, &self.config, &self.url, &self.toasts);

        let text = match command {
            ShellCommand::Show => render_config(&config::get_config(cfg)),
            ShellCommand::Set { path, value } => {
                render_config(&config::set_field(db, cfg, url, toasts, &path, value).await?)
            }
            ShellCommand::Undo => render_config(&config::undo(db, cfg, url, toasts).await),
            ShellCommand::Redo => render_config(&config::redo(db, cfg, url, toasts).await),
            ShellCommand::Reset => {
                config::request_reset(&self.reset);
                "Reset all settings to defaults? Type `confirm` or `cancel`.".to_string()
            }
            ShellCommand::Confirm => render_config(
                &config::confirm_reset(db, cfg, url, toasts, &self.reset).await?,
            ),
            ShellCommand::Cancel => {
                config::cancel_reset(&self.reset);
                "Reset cancelled.".to_string()
            }
            ShellCommand::Import(path) => {
                render_config(&transfer::import_file(db, cfg, url, toasts, &path).await?)
            }
            ShellCommand::Drop { mime, path } => {
                match transfer::import_dropped(db, cfg, url, toasts, &mime, &path).await? {
                    Some(response) => render_config(&response),
                    None => format!("Ignored drop of type {mime}"),
                }
            }
            ShellCommand::Paste(text) => {
                render_config(&transfer::import_text(db, cfg, url, toasts, &text).await?)
            }
            ShellCommand::Export => {
                let path = transfer::export_config(cfg, toasts, &self.export_dir).await?;
                format!("Wrote {}", path.display())
            }
            ShellCommand::Share => {
                transfer::copy_share_url(url, self.clipboard.as_ref(), toasts).await?
            }
            ShellCommand::Css => {
                transfer::copy_css_vars(cfg, self.clipboard.as_ref(), toasts).await?
            }
            ShellCommand::Url => url.href(),
            ShellCommand::Vars => style::style_vars(&cfg.current())
                .into_iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect::<Vec<_>>()
                .join("\n"),
            ShellCommand::Chair => render_customizer(&customize::get_customizer(&self.customizer)),
            ShellCommand::Customize { field, value } => {
                render_customizer(&customize::customize(&self.customizer, &field, &value)?)
            }
            ShellCommand::Add { preview } => {
                let (key, _) =
                    cart::add_configured_chair(db, &self.cart, &self.customizer, toasts, preview)
                        .await;
                format!("added {key}")
            }
            ShellCommand::Cart => render_cart(&cart::get_cart(&self.cart), &self.cart),
            ShellCommand::Qty { key, input } => {
                let response = cart::update_quantity(db, &self.cart, toasts, &key, &input).await?;
                render_cart(&response, &self.cart)
            }
            ShellCommand::Remove(key) => {
                let response = cart::remove_from_cart(db, &self.cart, toasts, &key).await?;
                render_cart(&response, &self.cart)
            }
            ShellCommand::Clear => {
                render_cart(&cart::clear_cart(db, &self.cart, toasts).await, &self.cart)
            }
            ShellCommand::Toasts => {
                let active = toasts.active();
                if active.is_empty() {
                    "No notices".to_string()
                } else {
                    active
                        .iter()
                        .map(|t| format!("{}  {}", t.id, t.message))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            ShellCommand::Dismiss(id) => {
                if toasts.dismiss(id) {
                    "Dismissed".to_string()
                } else {
                    return Err(ApiError::not_found("Toast", &id.to_string()));
                }
            }
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Quit => String::new(),
        };
        Ok(text)
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// Notices raised before the loop starts (the shared-link load) are
    /// printed ahead of the first prompt.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut events = self.toasts.subscribe();
        let mut lines = input.lines();

        for toast in self.toasts.active() {
            output.write_all(format!("» {}\n", toast.message).as_bytes()).await?;
        }
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            let text = match self.execute(&line).await {
                Outcome::Quit => break,
                Outcome::Continue(text) => text,
            };
            if !text.is_empty() {
                output.write_all(text.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }

            loop {
                match events.try_recv() {
                    Ok(ToastEvent::Shown(toast)) => {
                        output.write_all(format!("» {}\n", toast.message).as_bytes()).await?;
                    }
                    Ok(ToastEvent::Dismissed(_)) | Err(TryRecvError::Lagged(_)) => {}
                    Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
                }
            }

            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;
        }

        output.flush().await
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn render_config(response: &ConfigResponse) -> String {
    format!(
        "{}\nundo: {}  redo: {}",
        to_pretty(&response.config),
        yes_no(response.can_undo),
        yes_no(response.can_redo)
    )
}

fn render_customizer(response: &CustomizerResponse) -> String {
    format!("{}\nprice: {}", to_pretty(&response.customizer), response.price)
}

fn render_cart(response: &CartResponse, cart: &CartState) -> String {
    if response.items.is_empty() {
        return "Cart is empty".to_string();
    }

    let mut out: Vec<String> = response.items.iter().map(render_line).collect();
    let totals = &response.totals;
    out.push(format!("items: {}", totals.item_count));
    out.push(format!("subtotal: {}", totals.subtotal));
    out.push(format!("tax ({}%): {}", cart.tax_rate().percentage(), totals.tax));
    out.push(format!("total: {}", totals.total));
    out.join("\n")
}

fn render_line(item: &LineItem) -> String {
    let o = &item.options;
    format!(
        "{}  {} ({}, {} arms, {} legs)  {} x{} = {}",
        item.key,
        item.name,
        o.material.as_str(),
        o.arm_style.as_str(),
        o.legs_finish.as_str(),
        item.price,
        item.qty,
        item.line_total()
    )
}

fn to_pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::commands::test_support::Harness;

    fn shell(h: Harness, clipboard: MemoryClipboard, export_dir: PathBuf) -> Shell {
        Shell::new(
            h.db,
            h.config,
            h.cart,
            h.customizer,
            h.toasts,
            h.url,
            Arc::new(clipboard),
            export_dir,
        )
    }

    #[test]
    fn test_parse_words() {
        assert_eq!(ShellCommand::parse("  ").unwrap(), None);
        assert_eq!(ShellCommand::parse("^z").unwrap(), Some(ShellCommand::Undo));
        assert_eq!(ShellCommand::parse("ctrl+shift+z").unwrap(), Some(ShellCommand::Redo));
        assert_eq!(
            ShellCommand::parse("set button.radius 20").unwrap(),
            Some(ShellCommand::Set {
                path: "button.radius".into(),
                value: serde_json::json!(20)
            })
        );
        assert_eq!(
            ShellCommand::parse("set button.bg #ff0000").unwrap(),
            Some(ShellCommand::Set {
                path: "button.bg".into(),
                value: serde_json::json!("#ff0000")
            })
        );
        assert_eq!(
            ShellCommand::parse("drop application/json my theme.json").unwrap(),
            Some(ShellCommand::Drop {
                mime: "application/json".into(),
                path: PathBuf::from("my theme.json")
            })
        );
        assert_eq!(
            ShellCommand::parse("qty abc 3").unwrap(),
            Some(ShellCommand::Qty {
                key: "abc".into(),
                input: "3".into()
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(ShellCommand::parse("set button.radius").is_err());
        assert!(ShellCommand::parse("import").is_err());
        assert!(ShellCommand::parse("dismiss 42").is_err());
        assert!(ShellCommand::parse("frobnicate").is_err());
    }

    #[tokio::test]
    async fn test_session_transcript() {
        let h = Harness::new().await;
        let shell = shell(h, MemoryClipboard::new(), PathBuf::from("."));

        let input = "set button.radius 999\nundo\nadd\nadd\ncart\nquit\nshow\n";
        let mut output = Vec::new();
        shell.run(input.as_bytes(), &mut output).await.unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("\"radius\": 32"));
        assert!(output.contains("» Undid change"));
        assert_eq!(output.matches("» Added to cart").count(), 2);
        assert!(output.contains("x2 = $958.00"));
        assert!(output.contains("total: $1034.64"));
        // Nothing after quit runs.
        assert_eq!(shell.config().current().button.radius, 10);
        assert_eq!(output.matches(PROMPT).count(), 6);
    }

    #[tokio::test]
    async fn test_reset_flow_and_errors() {
        let h = Harness::new().await;
        let shell = shell(h, MemoryClipboard::new(), PathBuf::from("."));

        shell.execute("set layout.dark true").await;
        let outcome = shell.execute("confirm").await;
        assert!(matches!(outcome, Outcome::Continue(t) if t.starts_with("error:")));

        shell.execute("reset").await;
        shell.execute("cancel").await;
        assert!(shell.config().current().layout.dark);

        shell.execute("reset").await;
        shell.execute("confirm").await;
        assert!(!shell.config().current().layout.dark);

        let outcome = shell.execute("remove nope").await;
        assert!(matches!(outcome, Outcome::Continue(t) if t.contains("not found")));
        assert_eq!(shell.execute("exit").await, Outcome::Quit);
    }

    #[tokio::test]
    async fn test_share_and_css_use_clipboard() {
        let h = Harness::new().await;
        let clipboard = MemoryClipboard::new();
        let shell = shell(h, clipboard.clone(), PathBuf::from("."));

        shell.execute("css").await;
        assert!(clipboard.contents().unwrap().contains("--btn-radius:10px;"));

        shell.execute("share").await;
        assert_eq!(clipboard.contents(), Some(shell.url().href()));
    }

    #[tokio::test]
    async fn test_export_writes_into_export_dir() {
        let h = Harness::new().await;
        let dir = tempfile::tempdir().unwrap();
        let shell = shell(h, MemoryClipboard::new(), dir.path().to_path_buf());

        let Outcome::Continue(text) = shell.execute("export").await else {
            panic!("export quit the shell");
        };
        assert!(text.starts_with("Wrote "));
        assert!(dir.path().join("ui-config.json").exists());
    }
}
