use chrono::Utc;
use rusqlite::Connection;
use serde_json::{json, Value};
use surat_core::db::{open_db, open_db_in_memory};
use surat_core::repo::{SortDirection, SortKey, LETTER_HISTORY_KEY};
use surat_core::{
    DocumentType, LetterListQuery, LetterRepository, NewLetter, Person, SqliteLetterRepository,
};

fn task_letter(number: &str, title: &str, people: &[&str]) -> NewLetter {
    NewLetter {
        letter_number: number.to_string(),
        category: "KP".to_string(),
        subcategory: "KP.01".to_string(),
        document_type: DocumentType::SuratTugas,
        people: people
            .iter()
            .map(|nama| Person {
                nama: nama.to_string(),
                nip: "198001012005011001".to_string(),
                jabatan: "Pengawas".to_string(),
                ..Person::default()
            })
            .collect(),
        title: title.to_string(),
        use_table_format: Some(false),
        menimbang: vec!["Bahwa perlu.".to_string(), "Bahwa mampu.".to_string()],
        dasar: "DIPA 2025".to_string(),
        signature_name: Some("H. Zamroni".to_string()),
    }
}

fn stored_array(conn: &Connection) -> Vec<Value> {
    let raw: String = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1;",
            [LETTER_HISTORY_KEY],
            |row| row.get(0),
        )
        .unwrap();
    match serde_json::from_str(&raw).unwrap() {
        Value::Array(entries) => entries,
        other => panic!("archive is not an array: {other}"),
    }
}

#[test]
fn added_letter_reads_back_with_id_and_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLetterRepository::try_new(&conn).unwrap();

    let started = Utc::now();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let input = task_letter("12/Kw.18.01/2/KP.01/07/2025", "Monitoring madrasah", &["Ahmad"]);
    let saved = repo.add_letter(input.clone()).unwrap();

    assert!(!saved.id.is_empty());
    assert!(saved.created_at > started);

    let loaded = repo.get_letter(&saved.id).unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.letter_number, input.letter_number);
    assert_eq!(loaded.people, input.people);
    assert_eq!(loaded.menimbang, input.menimbang);

    let encoded = serde_json::to_value(&loaded).unwrap();
    let created_at = encoded["createdAt"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
}

#[test]
fn ids_are_unique_and_unknown_id_is_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLetterRepository::try_new(&conn).unwrap();

    let first = repo.add_letter(task_letter("1", "Satu", &[])).unwrap();
    let second = repo.add_letter(task_letter("2", "Dua", &[])).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(repo.get_letter("missing").unwrap(), None);
}

#[test]
fn listing_filters_and_sorts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLetterRepository::try_new(&conn).unwrap();

    repo.add_letter(task_letter("7/Kw", "Bimbingan teknis", &["Budi Santoso"]))
        .unwrap();
    repo.add_letter(task_letter("3/Kw", "Akreditasi", &["Siti Aminah"]))
        .unwrap();
    let mut memo = task_letter("5/Kw", "Undangan rapat", &["Kepala Bidang"]);
    memo.document_type = DocumentType::NotaDinas;
    repo.add_letter(memo).unwrap();

    let titles = |query: &LetterListQuery| -> Vec<String> {
        repo.list_letters(query)
            .unwrap()
            .into_iter()
            .map(|letter| letter.title)
            .collect()
    };

    assert_eq!(
        titles(&LetterListQuery::default()),
        ["Bimbingan teknis", "Akreditasi", "Undangan rapat"]
    );
    assert_eq!(titles(&LetterListQuery::search("SITI")), ["Akreditasi"]);
    assert_eq!(
        titles(&LetterListQuery::default().of_type(DocumentType::NotaDinas)),
        ["Undangan rapat"]
    );
    assert_eq!(
        titles(&LetterListQuery::default().sorted_by(SortKey::LetterNumber, SortDirection::Descending)),
        ["Bimbingan teknis", "Undangan rapat", "Akreditasi"]
    );
}

#[test]
fn clear_empties_the_archive() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLetterRepository::try_new(&conn).unwrap();
    repo.add_letter(task_letter("1", "Satu", &[])).unwrap();

    repo.clear().unwrap();

    assert!(repo
        .list_letters(&LetterListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn legacy_records_without_document_type_are_dropped_and_written_back() {
    let conn = open_db_in_memory().unwrap();
    let legacy = json!([
        {
            "id": 1719820800000_i64,
            "letterNumber": "1/Kw.18.01/2/KP.01/07/2024",
            "category": "KP",
            "subcategory": "KP.01",
            "createdAt": "2024-07-01T08:00:00.000Z",
            "people": [],
            "title": "Tanpa jenis"
        },
        {
            "id": "keep-me",
            "letterNumber": "2/Kw.18.01/2/KP.01/07/2024",
            "category": "KP",
            "subcategory": "KP.01",
            "documentType": "Surat Tugas",
            "createdAt": "2024-07-02T08:00:00.000Z",
            "people": [],
            "title": "Dengan jenis",
            "menimbang": ["a", "b"],
            "dasar": "DIPA"
        }
    ]);
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2);",
        [LETTER_HISTORY_KEY, legacy.to_string().as_str()],
    )
    .unwrap();

    let repo = SqliteLetterRepository::try_new(&conn).unwrap();

    let letters = repo.list_letters(&LetterListQuery::default()).unwrap();
    assert_eq!(letters.len(), 1);
    assert_eq!(letters[0].id, "keep-me");
    assert_eq!(stored_array(&conn).len(), 1);
}

#[test]
fn archive_survives_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("surat.db");

    let saved_id = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteLetterRepository::try_new(&conn).unwrap();
        repo.add_letter(task_letter("9", "Supervisi", &["Ahmad"]))
            .unwrap()
            .id
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteLetterRepository::try_new(&conn).unwrap();
    let loaded = repo.get_letter(&saved_id).unwrap().unwrap();
    assert_eq!(loaded.title, "Supervisi");
}
