//! Test fixtures: small single-page PDFs, optionally protected with the
//! standard security handler through lopdf.

#![allow(dead_code)]

use lopdf::{
    Document, EncryptionState, EncryptionVersion, Object, Permissions, Stream, StringFormat,
    dictionary,
};
use std::path::{Path, PathBuf};

const DOC_ID: [u8; 16] = [
    101, 26, 148, 254, 235, 120, 104, 211, 18, 169, 123, 55, 114, 112, 134, 14,
];

const CONTENT: &[u8] = b"BT /F1 12 Tf 72 712 Td (Hello) Tj ET";

fn build(protection: Option<(&str, &str)>) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let content_id = doc.add_object(Stream::new(dictionary! {}, CONTENT.to_vec()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(DOC_ID.to_vec(), StringFormat::Hexadecimal),
            Object::String(DOC_ID.to_vec(), StringFormat::Hexadecimal),
        ]),
    );

    if let Some((user_password, owner_password)) = protection {
        let version = EncryptionVersion::V1 {
            document: &doc,
            owner_password,
            user_password,
            permissions: Permissions::all(),
        };
        let state = EncryptionState::try_from(version).expect("Failed to derive encryption state");
        doc.encrypt(&state).expect("Failed to encrypt fixture");
    }

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("Failed to serialize fixture");
    out
}

/// A single-page PDF that opens only with `user_password` (or the owner
/// password `"owner"`).
pub fn protected_pdf(user_password: &str) -> Vec<u8> {
    build(Some((user_password, "owner")))
}

/// A single-page PDF without encryption.
pub fn plain_pdf() -> Vec<u8> {
    build(None)
}

pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("Failed to write fixture");
    path
}
