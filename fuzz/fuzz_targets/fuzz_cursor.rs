#![no_main]
use libfuzzer_sys::fuzz_target;
use pkcs7_verify::cursor::DerCursor;

fn walk(mut cursor: DerCursor, depth: u32) {
    while let Some(tag) = cursor.peek_tag() {
        if tag.is_constructed() && depth < 32 {
            match cursor.read_nested(tag) {
                Ok(nested) => walk(nested, depth + 1),
                Err(_) => return,
            }
        } else if cursor.read_raw(tag).is_err() {
            return;
        }
    }
}

fuzz_target!(|data: &[u8]| {
    if let Ok(cursor) = DerCursor::new(data) {
        walk(cursor, 0);
    }
});
