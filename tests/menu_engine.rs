use pickmenu::renderer::{Priority, Renderer, RendererRegistry};
use pickmenu::ui::MenuView;
use pickmenu::{Choice, Config, FilterMode, Key, Menu, MenuError, RunResult};
use std::collections::VecDeque;

/// Replays keys and records the frames it was asked to draw.
struct Scripted {
    keys: VecDeque<(Key, u32)>,
    frames: Vec<MenuView>,
    page: Option<usize>,
}

impl Scripted {
    fn new(keys: &[(Key, u32)]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            frames: Vec::new(),
            page: None,
        }
    }
}

impl Renderer for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn priority(&self) -> Priority {
        Priority::Gui
    }

    fn render(&mut self, view: &MenuView) -> pickmenu::Result<()> {
        self.frames.push(view.clone());
        Ok(())
    }

    fn page_size(&self) -> Option<usize> {
        self.page
    }

    fn poll_key(&mut self) -> pickmenu::Result<(Key, u32)> {
        self.keys
            .pop_front()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "out of keys").into())
    }
}

fn menu_with(config: &Config, texts: &[&str]) -> Menu {
    let mut menu = pickmenu::initialize(config).unwrap();
    for text in texts {
        menu.push_item(*text).unwrap();
    }
    menu
}

fn chosen_texts(menu: &Menu, result: &RunResult) -> Vec<String> {
    match result {
        RunResult::Selected(Choice::Items(ids)) => ids.iter().map(|&id| menu.text_of(id).to_string()).collect(),
        other => panic!("expected items, got {other:?}"),
    }
}

#[test]
fn typing_a_keeps_every_item_and_return_picks_the_first() {
    let config = Config {
        filter_mode: FilterMode::CaseInsensitive,
        ..Default::default()
    };
    let mut menu = menu_with(&config, &["alpha", "beta", "gamma"]);

    assert_eq!(menu.advance(Key::Unicode, u32::from('a')).unwrap(), RunResult::Running);
    assert_eq!(menu.filtered_items().len(), 3);

    let result = menu.advance(Key::Return, 0).unwrap();
    assert_eq!(chosen_texts(&menu, &result), ["alpha"]);
}

#[test]
fn narrowing_the_filter_pulls_the_highlight_into_range() {
    let mut menu = menu_with(&Config::default(), &["one", "two", "three", "four", "five"]);
    menu.set_highlighted_index(4).unwrap();

    menu.advance(Key::Unicode, u32::from('t')).unwrap();

    assert_eq!(menu.filtered_items().len(), 2);
    assert!(matches!(menu.highlighted_index(), Some(0 | 1)));

    menu.advance(Key::Backspace, 0).unwrap();
    menu.advance(Key::Unicode, u32::from('f')).unwrap();
    menu.advance(Key::Down, 0).unwrap();
    menu.advance(Key::Unicode, u32::from('i')).unwrap();

    assert_eq!(menu.filtered_items().len(), 1);
    assert_eq!(menu.highlighted_item().map(|id| menu.text_of(id)), Some("five"));
}

#[test]
fn multi_selection_is_returned_in_list_order() {
    let mut menu = menu_with(&Config::default(), &["a", "b", "c", "d"]);

    menu.advance(Key::Down, 0).unwrap();
    menu.advance(Key::Down, 0).unwrap();
    menu.advance(Key::ShiftTab, 0).unwrap();
    menu.advance(Key::Up, 0).unwrap();
    menu.advance(Key::Up, 0).unwrap();
    menu.advance(Key::Tab, 0).unwrap();

    let result = menu.advance(Key::Return, 0).unwrap();
    assert_eq!(chosen_texts(&menu, &result), ["a", "c"]);
}

#[test]
fn removing_a_selected_item_keeps_the_rest_selected() {
    let mut menu = menu_with(&Config::default(), &["a", "b", "c"]);
    let ids = menu.items().to_vec();
    menu.set_selected_items(&[ids[0], ids[2]]).unwrap();

    menu.remove_item(ids[0]).unwrap();

    assert_eq!(menu.selected_items(), vec![ids[2]]);
    assert!(menu.item(ids[0]).is_some());
    assert!(matches!(menu.remove_item(ids[0]), Err(MenuError::NotFound)));
}

#[test]
fn run_drives_the_renderer_until_a_choice() {
    let mut menu = menu_with(&Config::default(), &["red", "green", "blue"]);
    let mut renderer = Scripted::new(&[
        (Key::Unicode, u32::from('e')),
        (Key::Down, 0),
        (Key::Return, 0),
    ]);

    let result = pickmenu::run(&mut menu, &mut renderer).unwrap();

    assert_eq!(chosen_texts(&menu, &result), ["green"]);
    assert_eq!(renderer.frames.len(), 3);
    assert_eq!(renderer.frames[0].filtered_count, 3);
    assert_eq!(renderer.frames[1].filter, "e");
    assert_eq!(renderer.frames[1].filtered_count, 3);
    assert_eq!(renderer.frames[2].highlighted_row().map(|row| row.text.as_str()), Some("green"));
}

#[test]
fn run_applies_a_stale_filter_before_the_first_frame() {
    let mut menu = menu_with(&Config::default(), &["apple", "banana"]);
    menu.set_filter_text("nan").unwrap();
    let mut renderer = Scripted::new(&[(Key::Escape, 0)]);

    assert_eq!(pickmenu::run(&mut menu, &mut renderer).unwrap(), RunResult::Cancel);
    assert_eq!(renderer.frames[0].filtered_count, 1);
    assert_eq!(renderer.frames[0].rows[0].text, "banana");
}

#[test]
fn run_uses_the_renderer_page_size_for_single_line_paging() {
    let texts: Vec<String> = (0..20).map(|i| format!("item{i}")).collect();
    let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
    let mut menu = menu_with(&Config::default(), &texts);
    let mut renderer = Scripted::new(&[(Key::PageDown, 0), (Key::ShiftReturn, 0)]);
    renderer.page = Some(6);

    let result = pickmenu::run(&mut menu, &mut renderer).unwrap();
    assert_eq!(chosen_texts(&menu, &result), ["item6"]);
}

#[test]
fn run_propagates_renderer_errors() {
    let mut menu = menu_with(&Config::default(), &["x"]);
    let mut renderer = Scripted::new(&[]);

    assert!(matches!(pickmenu::run(&mut menu, &mut renderer), Err(MenuError::Io(_))));
}

#[test]
fn registry_prefers_the_config_override() {
    let mut registry = RendererRegistry::new();
    registry.register(Box::new(Scripted::new(&[])));

    assert_eq!(registry.select(None, Some("scripted")).unwrap().name(), "scripted");
    assert!(matches!(
        registry.select(Some("terminal"), None),
        Err(MenuError::RendererNotFound(name)) if name == "terminal"
    ));
}

#[test]
fn config_file_configures_the_menu() {
    let dir = tempfile::tempdir().unwrap();
    let theme_path = dir.path().join("dusk.toml");
    std::fs::write(
        &theme_path,
        "name = \"dusk\"\n\n[colors]\nhighlighted_bg = \"#334455\"\n",
    )
    .unwrap();

    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "filter_mode = \"case-insensitive\"\nlines = 7\nwrap = true\ntitle = \"run:\"\ntheme_file = \"{}\"\n\n[colors]\nitem_fg = \"#010203\"\n",
            theme_path.display()
        ),
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();
    let menu: Menu = pickmenu::initialize(&config).unwrap();

    assert_eq!(menu.filter_mode(), FilterMode::CaseInsensitive);
    assert_eq!(menu.lines(), 7);
    assert!(menu.wrap());
    assert_eq!(menu.title(), Some("run:"));
    assert_eq!(menu.theme().name, "dusk");
    assert_eq!(menu.color(pickmenu::ColorElement::HighlightedBg), "#334455");
    assert_eq!(menu.color(pickmenu::ColorElement::ItemFg), "#010203");
}

#[test]
fn config_file_rejects_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "scan_paths = [\"~\"]\n").unwrap();

    assert!(matches!(Config::from_file(&path), Err(MenuError::Config(_))));
    assert!(matches!(
        Config::from_file(dir.path().join("missing.toml")),
        Err(MenuError::Io(_))
    ));
}
