use std::{collections::BTreeMap, time::SystemTime};

use super::Catalog;

pub const MO_MAGIC_LE: u32 = 0x950412de;

/// Whether the binary form must be rebuilt from the text form.
///
/// `None` means the file does not exist.
pub fn needs_compilation(text_modified: Option<SystemTime>, binary_modified: Option<SystemTime>) -> bool {
    match (text_modified, binary_modified) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(text), Some(binary)) => text > binary,
    }
}

/// Build a little-endian gettext MO file.
///
/// Only translated, non-fuzzy, live messages are included, plus the header
/// entry under the empty id when the catalog has header fields.
pub fn compile_mo(catalog: &Catalog) -> Vec<u8> {
    let header = catalog
        .header
        .as_ref()
        .map(|h| h.to_msgstr())
        .filter(|h| !h.is_empty());

    let mut entries: BTreeMap<&str, &str> = BTreeMap::new();
    if let Some(header) = header.as_deref() {
        entries.insert("", header);
    }
    for message in catalog.iter() {
        if message.obsolete || message.fuzzy {
            continue;
        }
        if let Some(translation) = message.translation.as_deref().filter(|t| !t.is_empty()) {
            entries.insert(&message.id, translation);
        }
    }

    let count = entries.len() as u32;
    let header_size = 28u32; // 7 * 4 bytes
    let orig_table_offset = header_size;
    let trans_table_offset = orig_table_offset + count * 8;
    let strings_offset = trans_table_offset + count * 8;

    let mut orig_descriptors: Vec<(u32, u32)> = Vec::new();
    let mut trans_descriptors: Vec<(u32, u32)> = Vec::new();
    let mut string_data: Vec<u8> = Vec::new();

    for (id, translation) in &entries {
        orig_descriptors.push((id.len() as u32, strings_offset + string_data.len() as u32));
        string_data.extend_from_slice(id.as_bytes());
        string_data.push(0);

        trans_descriptors.push((
            translation.len() as u32,
            strings_offset + string_data.len() as u32,
        ));
        string_data.extend_from_slice(translation.as_bytes());
        string_data.push(0);
    }

    let mut out = Vec::with_capacity(strings_offset as usize + string_data.len());
    for word in [
        MO_MAGIC_LE,
        0, // revision
        count,
        orig_table_offset,
        trans_table_offset,
        0, // hash table size
        0, // hash table offset
    ] {
        out.extend_from_slice(&word.to_le_bytes());
    }
    for (len, offset) in orig_descriptors.iter().chain(&trans_descriptors) {
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());
    }
    out.extend_from_slice(&string_data);
    out
}

#[cfg(test)]
mod tests {
    use crate::core::catalog::mo::*;
    use crate::core::catalog::{Header, Message};
    use std::time::Duration;

    fn word(data: &[u8], index: usize) -> u32 {
        u32::from_le_bytes(data[index * 4..index * 4 + 4].try_into().unwrap())
    }

    /// Decode (original, translation) pairs from MO bytes.
    fn decode(data: &[u8]) -> Vec<(String, String)> {
        let count = word(data, 2) as usize;
        let orig_table = word(data, 3) as usize / 4;
        let trans_table = word(data, 4) as usize / 4;
        let read = |table: usize, i: usize| {
            let len = word(data, table + i * 2) as usize;
            let offset = word(data, table + i * 2 + 1) as usize;
            String::from_utf8(data[offset..offset + len].to_vec()).unwrap()
        };
        (0..count)
            .map(|i| (read(orig_table, i), read(trans_table, i)))
            .collect()
    }

    #[test]
    fn test_compile_includes_only_usable_translations() {
        let mut catalog = Catalog::new(Some("de"));
        catalog.insert(Message::new("World").with_translation("Welt"));
        catalog.insert(Message::new("Hello").with_translation("Hallo"));
        catalog.insert(Message::new("Untranslated"));
        let mut fuzzy = Message::new("Maybe").with_translation("Vielleicht");
        fuzzy.fuzzy = true;
        catalog.insert(fuzzy);
        let mut old = Message::new("Old").with_translation("Alt");
        old.obsolete = true;
        catalog.insert(old);

        let data = compile_mo(&catalog);
        assert_eq!(word(&data, 0), MO_MAGIC_LE);
        assert_eq!(
            decode(&data),
            vec![
                ("Hello".to_string(), "Hallo".to_string()),
                ("World".to_string(), "Welt".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_entry_only_with_fields() {
        let mut catalog = Catalog::new(Some("de"));
        catalog.insert(Message::new("Hello").with_translation("Hallo"));
        catalog.header = Some(Header::default());
        assert_eq!(
            decode(&compile_mo(&catalog)),
            vec![("Hello".to_string(), "Hallo".to_string())]
        );

        catalog.header = Some(Header {
            notice: Vec::new(),
            fields: vec![(
                "Content-Type".to_string(),
                "text/plain; charset=utf-8".to_string(),
            )],
        });
        assert_eq!(
            decode(&compile_mo(&catalog)),
            vec![
                (
                    "".to_string(),
                    "Content-Type: text/plain; charset=utf-8\n".to_string()
                ),
                ("Hello".to_string(), "Hallo".to_string()),
            ]
        );
    }

    #[test]
    fn test_needs_compilation() {
        let older = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let newer = SystemTime::UNIX_EPOCH + Duration::from_secs(200);

        assert!(!needs_compilation(None, None));
        assert!(!needs_compilation(None, Some(newer)));
        assert!(needs_compilation(Some(older), None));
        assert!(needs_compilation(Some(newer), Some(older)));
        assert!(!needs_compilation(Some(older), Some(newer)));
        assert!(!needs_compilation(Some(older), Some(older)));
    }
}
