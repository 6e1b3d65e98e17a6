//! Library-level tests for building, rendering and transferring note templates

use chrono::NaiveDate;
use textnote::domain::{ContentItem, Delimiters, NoteFormat, Section, Template};
use textnote::error::{TemplateSide, TextnoteError};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 12, 20).unwrap()
}

fn template(names: &[&str]) -> Template {
    Template::new(names.iter().copied(), date(), NoteFormat::default())
}

#[test]
fn test_headered_items_render_in_order() {
    let mut t = template(&["TODO"]);
    let todo = t.section_mut("TODO").unwrap();
    todo.push(ContentItem::new("morning", "- coffee"));
    todo.push(ContentItem::new("", "- lunch\n"));

    assert_eq!(
        t.to_string(),
        "-^-[Sun] 20 Dec 2020-v-\n\n_p_TODO_q_\nmorning\n- coffee\n- lunch\n"
    );
}

#[test]
fn test_custom_delimiters() {
    let format = NoteFormat {
        header: Delimiters::new("== ", " ==", 0),
        section: Delimiters::new("## ", "", 1),
        ..NoteFormat::default()
    };
    let mut t = Template::new(["A", "B"], date(), format);
    t.section_mut("B").unwrap().push(ContentItem::plain("text"));

    let rendered = t.render();
    assert_eq!(rendered, "== [Sun] 20 Dec 2020 ==\n## A\n\n## B\ntext\n");

    let mut parsed = Template::new(["A", "B"], date(), t.format().clone());
    parsed.populate(&rendered).unwrap();
    assert_eq!(parsed, t);
}

#[test]
fn test_move_between_days() {
    let mut yesterday = Template::new(
        ["TODO", "DONE"],
        date().pred_opt().unwrap(),
        NoteFormat::default(),
    );
    yesterday
        .section_mut("TODO")
        .unwrap()
        .push(ContentItem::plain("- unfinished"));
    let mut today = template(&["TODO", "DONE"]);

    today.move_section_contents(&mut yesterday, "TODO").unwrap();

    assert!(yesterday.section("TODO").unwrap().is_empty());
    assert!(today
        .section("TODO")
        .unwrap()
        .contains(&ContentItem::plain("- unfinished")));
}

#[test]
fn test_copy_reports_missing_side() {
    let src = template(&["TODO"]);
    let mut dst = template(&["DONE"]);

    match dst.copy_section_contents(&src, "TODO").unwrap_err() {
        TextnoteError::SectionNotFound { section, side } => {
            assert_eq!(section, "TODO");
            assert_eq!(side, TemplateSide::Target);
        }
        other => panic!("Expected SectionNotFound, got {:?}", other),
    }
}

#[test]
fn test_append_section_extends_template() {
    let mut t = template(&["TODO"]);
    t.append_section(Section::with_contents(
        "EXTRA",
        vec![ContentItem::plain("x")],
    ))
    .unwrap();

    assert_eq!(t.section_index("EXTRA"), Some(1));
    assert!(t.render().ends_with("_p_EXTRA_q_\nx\n"));
}
