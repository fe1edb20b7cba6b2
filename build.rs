use std::path::Path;

const FIELDS_PER_RECORD: usize = 8;

fn main() {
    let database_path = Path::new("data/rebase_enzymes.txt");
    validate_database_file(database_path);
    set_build_dependencies();
}

fn validate_database_file(database_path: &Path) {
    // Ensure the embedded database exists at build time
    assert!(
        database_path.exists(),
        "\n\nENZYME DATABASE BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the database file before building.\n",
        database_path.display()
    );

    let contents = std::fs::read_to_string(database_path).unwrap_or_else(|e| {
        panic!(
            "\n\nENZYME DATABASE BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            database_path.display()
        );
    });

    let records = validate_records(&contents);
    assert!(
        records > 0,
        "\n\nENZYME DATABASE BUILD ERROR: No complete records found\n\
         Each record needs {FIELDS_PER_RECORD} tagged lines <1>..<8>.\n"
    );

    println!("cargo:warning=Validated enzyme database: {records} records");
}

/// Count complete records, panicking on a record with missing or repeated tags
fn validate_records(contents: &str) -> usize {
    let mut seen = [false; FIELDS_PER_RECORD];
    let mut name = String::new();
    let mut first_line = 0;
    let mut records = 0;

    for (i, line) in contents.lines().enumerate() {
        let line_num = i + 1;
        let line = line.trim_end_matches('\r');

        if line.is_empty() {
            assert!(
                !seen.iter().any(|&s| s),
                "\n\nENZYME DATABASE BUILD ERROR: Incomplete record '{name}' starting on line {first_line}\n\
                 Missing tags: {}\n",
                missing_tags(&seen)
            );
            continue;
        }

        let bytes = line.as_bytes();
        if bytes.len() < 3 || bytes[0] != b'<' || bytes[2] != b'>' {
            continue;
        }
        let Some(tag) = char::from(bytes[1]).to_digit(10) else {
            continue;
        };
        let Some(slot) = (tag as usize).checked_sub(1).filter(|&s| s < FIELDS_PER_RECORD) else {
            continue;
        };

        if !seen.iter().any(|&s| s) {
            first_line = line_num;
        }
        assert!(
            !seen[slot],
            "\n\nENZYME DATABASE BUILD ERROR: Tag <{tag}> repeated on line {line_num}\n"
        );
        seen[slot] = true;

        let value = &line[3..];
        if slot == 0 {
            assert!(
                !value.trim().is_empty(),
                "\n\nENZYME DATABASE BUILD ERROR: Empty enzyme name on line {line_num}\n"
            );
            name = value.to_string();
        }
        if slot == 4 {
            assert!(
                !value.trim().is_empty(),
                "\n\nENZYME DATABASE BUILD ERROR: Enzyme '{name}' has no recognition site (line {line_num})\n"
            );
        }

        if seen.iter().all(|&s| s) {
            records += 1;
            seen = [false; FIELDS_PER_RECORD];
        }
    }

    records
}

fn missing_tags(seen: &[bool]) -> String {
    seen.iter()
        .enumerate()
        .filter(|(_, s)| !**s)
        .map(|(i, _)| format!("<{}>", i + 1))
        .collect::<Vec<_>>()
        .join(" ")
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the embedded database changes
    println!("cargo:rerun-if-changed=data/rebase_enzymes.txt");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
