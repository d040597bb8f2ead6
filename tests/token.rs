use libweb::token::Tokenizer;

#[test]
fn test_tokens_in_order() {
    let mut tokens = Tokenizer::new("a/b/c", '/');
    assert_eq!(tokens.first(), Some("a"));
    assert_eq!(tokens.next(), Some("b"));
    assert_eq!(tokens.next(), Some("c"));
    assert!(!tokens.has_next());
    assert_eq!(tokens.next(), None);
}

#[test]
fn test_leading_delimiter_skipped() {
    let mut tokens = Tokenizer::new("/a/b", '/');
    assert_eq!(tokens.first(), Some("a"));
    assert_eq!(tokens.next(), Some("b"));
    assert!(!tokens.has_next());
}

#[test]
fn test_token_at_index() {
    let tokens = Tokenizer::new("x/y/z", '/');
    assert_eq!(tokens.token_at(0), Some("x"));
    assert_eq!(tokens.token_at(2), Some("z"));
    assert_eq!(tokens.token_at(5), None);
}

#[test]
fn test_empty_source() {
    let mut tokens = Tokenizer::new("", '/');
    assert!(!tokens.has_next());
    assert_eq!(tokens.first(), None);
    assert_eq!(tokens.next(), None);
}

#[test]
fn test_only_delimiters() {
    // One leading delimiter is skipped; every remaining gap is an empty
    // token.
    let mut tokens = Tokenizer::new("//", '/');
    assert_eq!(tokens.first(), Some(""));
    assert_eq!(tokens.next(), Some(""));
    assert_eq!(tokens.next(), None);
}

#[test]
fn test_consecutive_delimiters_keep_empty_tokens() {
    let collected: Vec<&str> = Tokenizer::new("a//b", '/').collect();
    assert_eq!(collected, ["a", "", "b"]);
}

#[test]
fn test_trailing_delimiter_yields_empty_token() {
    let collected: Vec<&str> = Tokenizer::new("a/", '/').collect();
    assert_eq!(collected, ["a", ""]);
}

#[test]
fn test_for_loop_without_explicit_first() {
    let collected: Vec<&str> = Tokenizer::new("urn:schemas:device:1", ':').collect();
    assert_eq!(collected, ["urn", "schemas", "device", "1"]);
}

#[test]
fn test_has_next_before_start() {
    let tokens = Tokenizer::new("a/b", '/');
    assert!(!tokens.has_next());
}

#[test]
fn test_tokens_borrow_from_source() {
    // Zero-copy: the token is a subslice of the source string.
    let source = String::from("alpha.beta");
    let mut tokens = Tokenizer::new(&source, '.');
    let token = tokens.first().unwrap();
    assert_eq!(token.as_ptr(), source.as_ptr());
    assert_eq!(token, "alpha");
}

#[test]
fn test_single_token_source() {
    let mut tokens = Tokenizer::new("alone", '/');
    assert_eq!(tokens.first(), Some("alone"));
    assert!(!tokens.has_next());
    assert_eq!(tokens.next(), None);
}
