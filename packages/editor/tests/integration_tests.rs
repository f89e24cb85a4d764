//! Integration tests for editor crate

use blockmail_editor::{EditSession, EditorError, GeneratedChange, Mutation, Placement, SectionTarget};
use blockmail_linter::{auto_fix_all, validate};
use blockmail_model::{find_builtin, BlockKind, BlockPatch, Document};
use serde_json::json;

fn load(value: serde_json::Value) -> Document {
    Document::from_value(value).unwrap()
}

fn starter() -> Document {
    load(json!({
        "schemaVersion": 2,
        "blocks": [
            { "id": "spacer-1", "type": "spacer", "content": {}, "settings": { "height": 16 }, "position": 0 },
            { "id": "hero-1", "type": "hero", "content": { "headline": "Hi" }, "settings": {}, "position": 1 },
            { "id": "footer-1", "type": "footer", "content": { "text": "Bye" }, "settings": {}, "position": 2 }
        ],
        "globalSettings": {}
    }))
}

#[test]
fn test_document_lifecycle() {
    let mut session = EditSession::new("newsletter", starter()).unwrap();
    assert_eq!(session.version(), 0);

    let cta = find_builtin("call-to-action").unwrap();
    let inserted = session
        .insert_section(
            &cta,
            SectionTarget::Relative {
                target_id: "footer-1".to_string(),
                placement: Placement::Before,
            },
        )
        .unwrap();
    assert_eq!(inserted.len(), 3);

    let blocks = session.blocks();
    assert_eq!(blocks.len(), 6);
    assert_eq!(blocks.last().unwrap().id, "footer-1");
    assert!(blocks.iter().enumerate().all(|(i, b)| b.position == i));
    assert!(inserted.iter().all(|id| !["spacer-1", "hero-1", "footer-1"].contains(&id.as_str())));

    // serialize and reload keeps everything
    let json = session.document().unwrap().to_json().unwrap();
    let reloaded = Document::from_json(&json).unwrap();
    assert_eq!(reloaded.blocks, session.blocks());
}

#[test]
fn test_edit_session_workflow() {
    let mut session = EditSession::new("newsletter", starter()).unwrap();

    session
        .apply(Mutation::UpdateBlock {
            patch: BlockPatch::new("hero-1").content("headline", "Hello there"),
        })
        .unwrap();
    let duplicate = session
        .apply(Mutation::DuplicateBlock {
            block_id: "hero-1".to_string(),
        })
        .unwrap()
        .unwrap();

    // two heroes in a row: the linter flags the copy
    let violations = validate(session.blocks());
    assert!(violations
        .iter()
        .any(|v| v.block_id == duplicate && v.rule_id == "no-adjacent-heavy-blocks"));

    let fixed = auto_fix_all(session.blocks());
    session.replace_blocks(fixed).unwrap();
    assert!(validate(session.blocks()).iter().all(|v| !v.auto_fixable));
    assert_eq!(session.version(), 3);

    // one undo reverts the whole fix
    assert!(session.undo());
    assert_eq!(session.blocks().len(), 4);
    assert_eq!(session.blocks()[2].id, duplicate);
}

#[test]
fn test_generated_replace_then_undo() {
    let mut session = EditSession::new("newsletter", starter()).unwrap();
    let ticket = session.begin_request().unwrap();

    // edits are still allowed while a request is out
    session
        .apply(Mutation::InsertBlock {
            index: 0,
            kind: BlockKind::Logo,
        })
        .unwrap();
    assert!(matches!(session.begin_request(), Err(EditorError::RequestInFlight)));

    let generated: Document = load(json!({
        "blocks": [
            { "kind": "heading", "content": { "text": "Fresh" }, "id": "h" },
            { "kind": "text", "content": { "body": "Copy" }, "id": "t" }
        ],
        "globalSettings": { "contentWidth": "640px" }
    }));
    session
        .complete_request(
            ticket,
            GeneratedChange::Replace {
                blocks: generated.blocks,
                global_settings: Some(generated.global_settings),
            },
        )
        .unwrap();

    let snapshot = session.snapshot().unwrap();
    assert_eq!(snapshot.blocks.len(), 2);
    assert_eq!(snapshot.global_settings.max_width, 640);

    assert!(session.undo());
    assert_eq!(session.blocks().len(), 4);
    assert!(session.blocks()[0].is(BlockKind::Logo));
}
