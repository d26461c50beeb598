use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

use crate::{
    domain::{FieldPatch, FieldType, FormDraft, RenderMode},
    form::FillSession,
    presentation::{NoticeRender, UiContext, draw, renderer_for},
    store::{FormRepository, MemoryStore},
};

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn render(session: &FillSession, notice: Option<NoticeRender>) -> String {
    let backend = TestBackend::new(80, 32);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal
        .draw(|frame| {
            draw(
                frame,
                UiContext {
                    session,
                    renderer: renderer_for(session.mode()),
                    status_message: "Ready",
                    help: Some("Ctrl+S -> submit"),
                    notice,
                },
            )
        })
        .expect("draw");
    buffer_text(terminal.backend().buffer())
}

fn store() -> (MemoryStore, String) {
    let mut draft = FormDraft::new()
        .with_title("Intake session")
        .with_description("First visit");
    let section = draft.add_field(FieldType::Section, None);
    draft
        .update_field(&section, FieldPatch::new().with_label("History"))
        .expect("section");
    let inside = draft.add_field(FieldType::Select, Some(section.as_str()));
    draft
        .update_field(
            &inside,
            FieldPatch::new()
                .with_label("Mood")
                .with_options(vec!["Calm".into(), "Tense".into()]),
        )
        .expect("select");
    let orphan = draft.add_field(FieldType::Text, None);
    draft
        .update_field(
            &orphan,
            FieldPatch::new().with_label("Goal").with_required(true),
        )
        .expect("text");
    let mut store = MemoryStore::new();
    let form = store.save_form(draft).expect("save");
    (store, form.id)
}

#[test]
fn session_capture_shows_sections_and_client() {
    let (store, form_id) = store();
    let session =
        FillSession::open(&store, &form_id, RenderMode::Internal).with_client_name("Ada");
    let screen = render(&session, None);
    assert!(screen.contains("Session capture"));
    assert!(screen.contains("Intake session"));
    assert!(screen.contains("First visit"));
    assert!(screen.contains("Client: Ada"));
    assert!(screen.contains("Sections"));
    assert!(screen.contains("History"));
    assert!(screen.contains("Goal *"));
    assert!(screen.contains("[ Calm ]"));
    assert!(screen.contains("Keys: Ctrl+S -> submit"));
    assert!(screen.contains("focus: Goal"));
    assert!(screen.contains("[ok]"));
    let goal = screen.find("Goal *").expect("goal");
    let history = screen.rfind("History").expect("history");
    assert!(goal < history, "orphans render before sections");
}

#[test]
fn public_form_is_flat_and_counts_required() {
    let (store, form_id) = store();
    let session = FillSession::open(&store, &form_id, RenderMode::Public);
    let screen = render(&session, None);
    assert!(screen.contains("Public form"));
    assert!(!screen.contains("Sections"));
    assert!(screen.contains("Goal * (required)"));
    assert!(screen.contains("( ) Calm"));
    assert!(screen.contains("required left: 1"));
    assert!(screen.contains("[! 1]"));
}

#[test]
fn missing_form_renders_not_found() {
    let store = MemoryStore::new();
    let session = FillSession::open(&store, "ghost", RenderMode::Public);
    let notice = NoticeRender::new("Form not found", vec!["Check the link.".into()]).alert();
    let screen = render(&session, Some(notice));
    assert!(screen.contains("Form ghost"));
    assert!(screen.contains("Form not found"));
    assert!(screen.contains("[not found]"));
}
