use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use crate::app;
use crate::content::{ContentLoader, ContentSource};
use crate::navigation::Event;
use crate::page::{markup, Document, PageSurface};
use crate::settings::{Settings, SETTINGS_FILE};
use crate::theme::{FileThemeStore, Theme, ThemeController, ThemeStore};

/// Layout used when no template is configured.
pub const BUILTIN_TEMPLATE: &str = include_str!("../site/index.html");

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Render a portfolio page from its configuration")]
pub struct Cli {
    /// Settings file
    #[arg(long, global = true, default_value = SETTINGS_FILE)]
    pub settings: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Project the configuration onto the page and write it out
    Render(PageArgs),
    /// Load the configuration and report what it contains
    Check {
        #[arg(long)]
        content: Option<String>,
    },
    /// Show or change the stored theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Render, then replay interaction events against the page
    Replay {
        #[command(flatten)]
        page: PageArgs,
        /// Section layout offset, as ID=PIXELS (repeatable)
        #[arg(long = "offset", value_parser = parse_offset)]
        offsets: Vec<(String, f64)>,
        /// Events: `load`, `scroll:<y>` or `click:<selector>`
        #[arg(required = true)]
        events: Vec<ScriptedEvent>,
    },
}

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Configuration document (path or http(s) URL)
    #[arg(long)]
    pub content: Option<String>,
    /// Page markup to project into
    #[arg(long)]
    pub template: Option<PathBuf>,
    /// Where to write the rendered page
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    Show,
    Toggle,
    Set { theme: String },
}

/// One step of a `replay` script.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedEvent {
    Load,
    Scroll(f64),
    Click(String),
}

impl FromStr for ScriptedEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "load" {
            return Ok(ScriptedEvent::Load);
        }
        match s.split_once(':') {
            Some(("scroll", y)) => y
                .trim()
                .parse()
                .map(ScriptedEvent::Scroll)
                .map_err(|_| format!("bad scroll position {:?}", y)),
            Some(("click", sel)) if !sel.trim().is_empty() => {
                Ok(ScriptedEvent::Click(sel.trim().to_string()))
            }
            _ => Err(format!(
                "unknown event {:?} (expected load, scroll:<y> or click:<selector>)",
                s
            )),
        }
    }
}

fn parse_offset(s: &str) -> Result<(String, f64), String> {
    let (id, y) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=PIXELS, got {:?}", s))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|_| format!("bad offset {:?}", y))?;
    Ok((id.trim().to_string(), y))
}

/// Why a command stopped.
#[derive(Debug)]
pub enum CommandError {
    /// Already logged where it happened.
    Reported,
    Message(String),
}

impl From<String> for CommandError {
    fn from(msg: String) -> Self {
        CommandError::Message(msg)
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Reported => write!(f, "command failed"),
            CommandError::Message(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn run(cli: Cli) -> Result<(), CommandError> {
    let settings = Settings::load(&cli.settings)?;
    match cli.command {
        Command::Render(args) => render(&settings, &args, &[], &[]),
        Command::Check { content } => check(&settings, content.as_deref()),
        Command::Theme { action } => theme(&settings, action),
        Command::Replay {
            page,
            offsets,
            events,
        } => render(&settings, &page, &offsets, &events),
    }
}

fn content_source(settings: &Settings, over: Option<&str>) -> ContentSource {
    match over {
        Some(raw) => ContentSource::parse(raw, settings.content_source_timeout()),
        None => settings.content_source(),
    }
}

fn preference_store(settings: &Settings) -> FileThemeStore {
    FileThemeStore::with_key(&settings.preferences.path, &settings.preferences.key)
}

fn load_page(settings: &Settings, args: &PageArgs) -> Result<Document, String> {
    match args.template.as_ref().or(settings.page.template.as_ref()) {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("Cannot read template {}: {}", path.display(), e))?;
            markup::parse(&raw).map_err(|e| format!("Template {}: {}", path.display(), e))
        }
        None => markup::parse(BUILTIN_TEMPLATE).map_err(|e| format!("Built-in template: {}", e)),
    }
}

fn write_page(page: &Document, out: &Path) -> Result<(), String> {
    if let Some(dir) = out.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Cannot create {}: {}", dir.display(), e))?;
    }
    std::fs::write(out, page.to_html())
        .map_err(|e| format!("Cannot write {}: {}", out.display(), e))?;
    info!("Wrote {}", out.display());
    Ok(())
}

fn apply_offsets(page: &mut Document, offsets: &[(String, f64)]) {
    let sections = page.query_all("section[id]");
    for (id, top) in offsets {
        match sections
            .iter()
            .copied()
            .find(|&s| page.attr(s, "id").as_deref() == Some(id.as_str()))
        {
            Some(section) => page.set_offset_top(section, *top),
            None => warn!("No section with id {:?}", id),
        }
    }
}

/// Boot against the page, replay `events`, write the result. A plain
/// render is the one-event script `load`.
fn render(
    settings: &Settings,
    args: &PageArgs,
    offsets: &[(String, f64)],
    events: &[ScriptedEvent],
) -> Result<(), CommandError> {
    let mut page = load_page(settings, args)?;
    apply_offsets(&mut page, offsets);
    let source = content_source(settings, args.content.as_deref());

    {
        // boot has already logged the load failure
        let mut app = app::boot(&source, &mut page, preference_store(settings))
            .map_err(|_| CommandError::Reported)?;

        if events.is_empty() {
            app.dispatch(Event::Load);
        }
        for step in events {
            let event = match step {
                ScriptedEvent::Load => Event::Load,
                ScriptedEvent::Scroll(y) => Event::Scroll { y: *y },
                ScriptedEvent::Click(selector) => match app.page().query(selector) {
                    Some(node) => Event::Click(node),
                    None => {
                        warn!("Nothing to click at {:?}", selector);
                        continue;
                    }
                },
            };
            let outcome = app.dispatch(event);
            info!("{:?} -> {:?}", step, outcome);
        }
        info!("Rendered page for {}", app.config().profile.name);
    }

    let out = args.out.as_ref().unwrap_or(&settings.page.output);
    write_page(&page, out)?;
    Ok(())
}

fn check(settings: &Settings, content: Option<&str>) -> Result<(), CommandError> {
    let source = content_source(settings, content);
    let config = source.load().map_err(|e| e.to_string())?;

    println!("{}", source.describe());
    println!(
        "  title:       {}",
        config.site_info.title.as_deref().unwrap_or("(none)")
    );
    println!("  profile:     {} ({})", config.profile.name, config.profile.title);
    println!("  paragraphs:  {}", config.about.introduction.len());
    println!("  quick facts: {}", config.about.quick_facts.facts.len());
    println!("  skills:      {} categories", config.skills.categories.len());
    let live = config
        .projects
        .featured
        .iter()
        .filter(|p| p.live_demo().is_some())
        .count();
    println!(
        "  projects:    {} featured, {} with live demo",
        config.projects.featured.len(),
        live
    );
    println!("  contact:     {} methods", config.contact.methods.len());
    println!("  social:      {} links", config.social_links.len());
    Ok(())
}

fn theme(settings: &Settings, action: ThemeAction) -> Result<(), CommandError> {
    let mut store = preference_store(settings);
    match action {
        ThemeAction::Show => {
            let current = store.get_theme();
            println!("{} ({})", current, current.toggle_label());
        }
        ThemeAction::Toggle => {
            // Toggle against an empty page: only the preference matters here.
            let mut page = Document::new();
            let mut controller = ThemeController::new(store);
            let next = controller.toggle(&mut page);
            println!("{}", next);
        }
        ThemeAction::Set { theme } => {
            let theme = Theme::from_str(&theme)
                .ok_or_else(|| format!("unknown theme {:?} (light, dark or system)", theme))?;
            store.set(theme.name())?;
            println!("{}", theme);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_event_parse() {
        assert_eq!("load".parse::<ScriptedEvent>(), Ok(ScriptedEvent::Load));
        assert_eq!("scroll:700".parse::<ScriptedEvent>(), Ok(ScriptedEvent::Scroll(700.0)));
        assert_eq!(
            "click:.mobile-menu-toggle".parse::<ScriptedEvent>(),
            Ok(ScriptedEvent::Click(".mobile-menu-toggle".to_string()))
        );
        assert!("scroll:far".parse::<ScriptedEvent>().is_err());
        assert!("click:".parse::<ScriptedEvent>().is_err());
        assert!("hover:a".parse::<ScriptedEvent>().is_err());
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("about=800"), Ok(("about".to_string(), 800.0)));
        assert!(parse_offset("about").is_err());
        assert!(parse_offset("about=x").is_err());
    }

    #[test]
    fn test_builtin_template_parses() {
        let page = markup::parse(BUILTIN_TEMPLATE).unwrap();
        assert!(page.query(".hero h1").is_some());
        assert!(page.query(".theme-toggle").is_some());
        assert_eq!(page.query_all("#about .about-text").len(), 3);
    }

    #[test]
    fn test_cli_parses_replay() {
        let cli = Cli::try_parse_from([
            "folio",
            "replay",
            "--offset",
            "about=800",
            "scroll:700",
            "click:#about",
        ])
        .unwrap();
        match cli.command {
            Command::Replay { offsets, events, .. } => {
                assert_eq!(offsets, vec![("about".to_string(), 800.0)]);
                assert_eq!(events.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    // ── Commands against a scratch workspace ─────────────

    const SAMPLE_CONFIG: &str = include_str!("../config.json");

    /// A temp dir holding `folio.toml`, the sample configuration and room
    /// for the rendered page and preference file.
    struct Workspace {
        dir: tempfile::TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("config.json"), SAMPLE_CONFIG).unwrap();
            let settings = format!(
                "[content]\nsource = \"{}\"\n\n[page]\noutput = \"{}\"\n\n[preferences]\npath = \"{}\"\n",
                dir.path().join("config.json").display(),
                dir.path().join("out/index.html").display(),
                dir.path().join("prefs.json").display(),
            );
            std::fs::write(dir.path().join("folio.toml"), settings).unwrap();
            Workspace { dir }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn run(&self, args: &[&str]) -> Result<(), CommandError> {
            let mut argv = vec![
                "folio".to_string(),
                "--settings".to_string(),
                self.path("folio.toml").display().to_string(),
            ];
            argv.extend(args.iter().map(|a| a.to_string()));
            run(Cli::try_parse_from(argv).unwrap())
        }

        fn stored_theme(&self) -> Theme {
            FileThemeStore::new(self.path("prefs.json")).get_theme()
        }
    }

    #[test]
    fn test_render_writes_projected_page() {
        let ws = Workspace::new();
        ws.run(&["render"]).unwrap();

        let html = std::fs::read_to_string(ws.path("out/index.html")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Based in Berlin building reliable software"));
        assert!(html.contains("<title>Alex Doe | Systems Engineer</title>"));
        assert!(html.contains(r#"data-theme="system""#));
        // the load event ran
        assert!(html.contains("opacity: 1"));
    }

    #[test]
    fn test_render_honours_out_flag() {
        let ws = Workspace::new();
        let out = ws.path("elsewhere/page.html");
        ws.run(&["render", "--out", &out.display().to_string()]).unwrap();
        assert!(out.exists());
        assert!(!ws.path("out/index.html").exists());
    }

    #[test]
    fn test_render_with_missing_content_writes_nothing() {
        let ws = Workspace::new();
        let missing = ws.path("missing.json").display().to_string();
        let err = ws.run(&["render", "--content", &missing]).unwrap_err();
        assert!(matches!(err, CommandError::Reported));
        assert!(!ws.path("out/index.html").exists());
    }

    #[test]
    fn test_replay_writes_interaction_state() {
        let ws = Workspace::new();
        ws.run(&[
            "replay",
            "--offset",
            "home=0",
            "--offset",
            "about=800",
            "scroll:700",
            "click:.mobile-menu-toggle",
        ])
        .unwrap();

        let html = std::fs::read_to_string(ws.path("out/index.html")).unwrap();
        assert!(html.contains(r##"<a href="#about" class="nav-link active">"##));
        assert!(html.contains(r#"class="nav-links mobile-menu active""#));
        // no load event in the script
        assert!(html.contains("opacity: 0"));
    }

    #[test]
    fn test_theme_set_rejects_unknown_name() {
        let ws = Workspace::new();
        match ws.run(&["theme", "set", "sepia"]) {
            Err(CommandError::Message(msg)) => assert!(msg.contains("unknown theme")),
            other => panic!("expected an error, got {:?}", other),
        }
        assert!(!ws.path("prefs.json").exists());
    }

    #[test]
    fn test_theme_set_and_toggle_persist() {
        let ws = Workspace::new();
        assert_eq!(ws.stored_theme(), Theme::System);

        ws.run(&["theme", "set", "dark"]).unwrap();
        assert_eq!(ws.stored_theme(), Theme::Dark);

        ws.run(&["theme", "toggle"]).unwrap();
        assert_eq!(ws.stored_theme(), Theme::System);
        ws.run(&["theme", "toggle"]).unwrap();
        assert_eq!(ws.stored_theme(), Theme::Light);

        ws.run(&["theme", "show"]).unwrap();
    }

    #[test]
    fn test_check_loads_configuration() {
        let ws = Workspace::new();
        ws.run(&["check"]).unwrap();

        let broken = ws.path("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        let err = ws
            .run(&["check", "--content", &broken.display().to_string()])
            .unwrap_err();
        match err {
            CommandError::Message(msg) => assert!(msg.contains("invalid configuration")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
