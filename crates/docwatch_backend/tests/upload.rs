use docwatch_backend::{
    file_kind, format_file_size, FileKind, UploadPolicy, UploadViolation, MAX_FILE_SIZE,
};
use pretty_assertions::assert_eq;

#[test]
fn accepts_supported_extensions_case_insensitively() {
    let policy = UploadPolicy::default();
    assert!(policy.check("Report.PDF", 1024).is_empty());
    assert!(policy.check("scan.Tiff", 1024).is_empty());
}

#[test]
fn rejects_an_unknown_extension() {
    let policy = UploadPolicy::default();
    assert_eq!(
        policy.check("setup.exe", 1024),
        vec![UploadViolation::UnsupportedType {
            extension: "exe".to_string()
        }]
    );
}

#[test]
fn rejects_an_oversized_file() {
    let policy = UploadPolicy::default();
    assert_eq!(
        policy.check("big.pdf", MAX_FILE_SIZE + 1),
        vec![UploadViolation::TooLarge {
            size: MAX_FILE_SIZE + 1,
            max: MAX_FILE_SIZE,
        }]
    );
}

#[test]
fn violations_accumulate() {
    let policy = UploadPolicy::default();
    let violations = policy.check("dump.bin", MAX_FILE_SIZE * 2);
    assert_eq!(violations.len(), 2);
}

#[test]
fn a_name_without_a_dot_is_refused() {
    let policy = UploadPolicy::default();
    assert_eq!(
        policy.check("README", 10),
        vec![UploadViolation::UnsupportedType {
            extension: "readme".to_string()
        }]
    );
}

#[test]
fn violation_messages_match_the_upload_form() {
    let too_large = UploadViolation::TooLarge {
        size: 52 * 1024 * 1024,
        max: MAX_FILE_SIZE,
    };
    assert_eq!(too_large.to_string(), "File too large: 52 MB (max: 50 MB)");

    let unsupported = UploadViolation::UnsupportedType {
        extension: "exe".to_string(),
    };
    assert_eq!(unsupported.to_string(), "File type not supported: exe");
}

#[test]
fn sizes_render_in_human_units() {
    assert_eq!(format_file_size(0), "0 Bytes");
    assert_eq!(format_file_size(500), "500 Bytes");
    assert_eq!(format_file_size(1023), "1023 Bytes");
    assert_eq!(format_file_size(1024), "1 KB");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(1234), "1.21 KB");
    assert_eq!(format_file_size(1024 * 1024), "1 MB");
    assert_eq!(format_file_size(MAX_FILE_SIZE), "50 MB");
    assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
}

#[test]
fn files_group_into_display_kinds() {
    assert_eq!(file_kind("paper.pdf"), FileKind::Pdf);
    assert_eq!(file_kind("photo.JPEG"), FileKind::Image);
    assert_eq!(file_kind("notes.txt"), FileKind::Text);
    assert_eq!(file_kind("draft.docx"), FileKind::Text);
    assert_eq!(file_kind("archive.zip"), FileKind::Other);
}
