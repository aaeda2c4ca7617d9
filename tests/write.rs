use anyhow::Result;
use kqml::read::{read_all, read_file, write_all, write_file};
use kqml::parse::Reader;
use kqml::value::{Expr, KqmlList, Quotekind, is_word, token, string, quotation};

fn reread(e: &Expr) -> Result<Expr> {
    let s = e.to_string();
    let e = Reader::new(s.as_bytes()).read_expr(true)?;
    Ok(e)
}

#[test]
fn display() {
    let e = Expr::List(KqmlList::from(vec![
        token("tell"),
        token(":content"),
        quotation(Quotekind::Quasiquote,
                  Expr::List(KqmlList::from(vec![
                      token("a"),
                      quotation(Quotekind::Unquote, token("b"))]))),
        string("say \"hi\""),
        string("back\\slash"),
        Expr::List(KqmlList::new()),
    ]));
    assert_eq!(e.to_string(),
               r#"(tell :content `(a ,b) "say \"hi\"" #10"back\slash ())"#);
}

#[test]
fn written_values_read_back() -> Result<()> {
    for e in [
        string("plain"),
        string(""),
        string("quote \" inside"),
        string("two \\\\ backslashes"),
        string("(parens) 'and' #hash"),
        string("日本語 \\"),
        quotation(Quotekind::Quote, token("x")),
        Expr::List(KqmlList::from(vec![
            token("a"),
            Expr::List(KqmlList::from(vec![string("b\\"), token("c")])),
            quotation(Quotekind::Quasiquote,
                      quotation(Quotekind::Unquote, token("d")))])),
    ] {
        assert_eq!(reread(&e)?, e);
    }
    Ok(())
}

#[test]
fn unreadable_tokens_are_written_as_strings() {
    assert_eq!(token("a b").to_string(), "\"a b\"");
    assert_eq!(token(",x").to_string(), "\",x\"");
    assert_eq!(token("").to_string(), "\"\"");
}

#[test]
fn words() {
    assert!(is_word("ask-if"));
    assert!(is_word(":reply-with"));
    assert!(is_word("x1.5"));
    assert!(!is_word(""));
    assert!(!is_word("a,b"));
    assert!(!is_word("a;b"));
}

#[test]
fn write_then_read_all() -> Result<()> {
    let input = "(tell :content \"x\")\n(ask-if :content '(p ?x))\n";
    let v = read_all(input.as_bytes())?;
    let mut out = Vec::<u8>::new();
    write_all(&mut out, &v)?;
    assert_eq!(String::from_utf8(out)?, input);
    Ok(())
}

#[test]
fn write_file_then_read_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("messages.kqml");
    let v = read_all("(tell :content #3\"a\\b :ontology x)\n(sorry)".as_bytes())?;
    write_file(&path, &v)?;
    assert_eq!(std::fs::read_to_string(&path)?,
               "(tell :content #3\"a\\b :ontology x)\n(sorry)\n");
    assert_eq!(read_file(&path)?, v);
    Ok(())
}
