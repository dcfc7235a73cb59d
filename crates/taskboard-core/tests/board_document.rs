use chrono::{TimeZone, Utc};
use taskboard_core::model::card::{CardDraft, CardPatch};
use taskboard_core::model::id::{IdGenerator, UserId};
use taskboard_core::snapshot::BoardDocument;
use taskboard_core::store::BoardStore;

const EXPORTED: &str = r#"[
  {
    "_id": "65f0c0ffee0000000000b001",
    "name": "Website relaunch",
    "description": null,
    "owner": "65f0c0ffee0000000000u001",
    "members": [
      {"_id": "m1", "user": "65f0c0ffee0000000000u001", "email": "lead@example.com", "role": "owner"},
      {"_id": "m2", "email": "invitee@example.com", "role": "member"}
    ],
    "lists": [
      {
        "_id": "l-todo",
        "title": "To Do",
        "position": 0,
        "cards": [
          {"_id": "c1", "title": "Draft copy", "description": null, "dueDate": "2026-10-20"},
          {"_id": "c2", "title": "Pick fonts", "dueDate": "2026-10-12T09:00:00.000Z",
           "createdAt": "2026-10-01T08:00:00.000Z", "updatedAt": "2026-10-02T08:00:00.000Z"}
        ]
      },
      {"_id": "l-doing", "title": "In Progress", "position": 1},
      {"_id": "l-done", "title": "Done", "position": 2, "cards": null}
    ],
    "createdAt": "2026-10-01T08:00:00.000Z"
  }
]"#;

#[test]
fn exported_document_loads_with_lenient_fields() {
    let boards = BoardDocument::from_json(EXPORTED).expect("document decodes");
    assert_eq!(boards.len(), 1);
    let board = &boards[0];

    assert!(board.description.is_empty());
    assert_eq!(board.members.len(), 2);
    assert!(board.has_access(&UserId::new("65f0c0ffee0000000000u001")));
    assert_eq!(board.snapshot().card_count(), 2);
    assert!(board.lists[1].is_empty());
    assert!(board.lists[2].is_empty());

    let draft = &board.lists[0].cards[0];
    assert_eq!(
        draft.due_date,
        Some(Utc.with_ymd_and_hms(2026, 10, 20, 0, 0, 0).unwrap())
    );
}

#[test]
fn edits_through_store_survive_reexport() {
    let boards = BoardDocument::from_json(EXPORTED).expect("document decodes");
    let board_id = boards[0].id.clone();
    let owner = UserId::new("65f0c0ffee0000000000u001");
    let mut store = BoardStore::from_boards(boards);
    let mut ids = IdGenerator::from_seed(99);
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();

    let board = store.get_mut(&board_id).expect("board present");
    let todo = board.lists[0].id.clone();
    let doing = board.lists[1].id.clone();
    let card = board
        .add_card(
            &todo,
            CardDraft {
                title: "Review analytics".to_string(),
                description: Some("started working on dashboards".to_string()),
                due_date: None,
            },
            Some(owner.clone()),
            &mut ids,
            now,
        )
        .expect("card added");
    board
        .update_card(
            &todo,
            &card,
            CardPatch {
                title: Some("Review analytics setup".to_string()),
                ..CardPatch::default()
            },
            now,
        )
        .expect("card updated");
    board
        .move_card(&todo, &card, &doing, 0, now)
        .expect("card moved");

    let exported = BoardDocument::to_json(&store.iter().cloned().collect::<Vec<_>>())
        .expect("export succeeds");
    let reloaded = BoardDocument::from_json(&exported).expect("reload succeeds");
    let moved = &reloaded[0].lists[1].cards[0];
    assert_eq!(moved.title, "Review analytics setup");
    assert_eq!(moved.created_by.as_ref(), Some(&owner));
    assert_eq!(reloaded[0].updated_at, Some(now));
    assert_eq!(store.boards_for(&owner).count(), 1);
}
