use anyhow::Result;
use kqml::parse::{Reader, ReadError};
use kqml::pos::Pos;
use kqml::settings::SHALLOW_SETTINGS;
use kqml::stream::CharStream;
use kqml::performative::Performative;
use kqml::read::{read_all, read_file, read_performative, read_stream, Source};
use kqml::value::{Expr, KqmlList, token, string};
use std::path::Path;

#[test]
fn performative() -> Result<()> {
    let p = read_performative(
        "  \n (tell :sender agent1 :content (father john mary) :language KIF)"
            .as_bytes())?;
    assert_eq!(p.verb(), Some("tell"));
    assert_eq!(p.get(":sender"), Some(&token("agent1")));
    assert_eq!(p.get(":CONTENT"),
               Some(&Expr::List(KqmlList::from(vec![token("father"),
                                                    token("john"),
                                                    token("mary")]))));
    assert_eq!(p.get(":reply-with"), None);
    assert_eq!(p.list().len(), 7);
    Ok(())
}

#[test]
fn arguments_after_content() -> Result<()> {
    let p = read_performative("(tell :content (p x) :language KIF)".as_bytes())?;
    assert_eq!(p.get(":content"),
               Some(&Expr::List(KqmlList::from(vec![token("p"), token("x")]))));
    assert_eq!(p.get(":language"), Some(&token("KIF")));
    Ok(())
}

#[test]
fn performative_must_be_a_list() {
    let e = read_performative("foo".as_bytes()).unwrap_err();
    assert!(matches!(e.err, ReadError::ExpectedList));
    assert_eq!(e.inbuf, "foo");
    let e = read_performative("  \"tell\"".as_bytes()).unwrap_err();
    assert!(matches!(e.err, ReadError::ExpectedList));
    assert_eq!(e.inbuf, "\"tell\"");
}

#[test]
fn end_of_input() {
    let e = read_performative("  \n ".as_bytes()).unwrap_err();
    assert!(e.is_eof());
    let e = read_performative(" (tell :content".as_bytes()).unwrap_err();
    assert!(e.is_incomplete());
    assert_eq!(e.inbuf, "(tell :content");
}

#[test]
fn diagnostics_restart_with_each_performative() -> Result<()> {
    let mut r = Reader::new("(ask-one :content x)\n  (tell ,x)".as_bytes());
    r.read_performative()?;
    let e = r.read_performative().unwrap_err();
    assert!(matches!(e.err, ReadError::BadCommand));
    assert_eq!(e.inbuf, "(tell ,");
    Ok(())
}

#[test]
fn performatives_iterator() -> Result<()> {
    let mut r = Reader::new("(a)(b)\n(c :x 1)  ".as_bytes());
    let verbs = r.performatives()
        .map(|p| -> Result<Option<String>> { Ok(p?.verb().map(String::from)) })
        .collect::<Result<Vec<_>>>()?;
    assert_eq!(verbs, [Some("a".into()), Some("b".into()), Some("c".into())]);

    let mut r = Reader::new("(a) foo (b)".as_bytes());
    let mut ps = r.performatives();
    assert!(ps.next().unwrap().is_ok());
    assert!(matches!(ps.next().unwrap().unwrap_err().err, ReadError::ExpectedList));
    assert!(ps.next().is_none());
    Ok(())
}

#[test]
fn try_from_expr() {
    let l = KqmlList::from(vec![token("sorry")]);
    let p = Performative::try_from(Expr::List(l.clone())).unwrap();
    assert_eq!(p.verb(), Some("sorry"));
    assert_eq!(p.into_list(), l);
    assert_eq!(Performative::try_from(string("x")).unwrap_err(), string("x"));
}

#[test]
fn verb_must_be_a_token() -> Result<()> {
    let p = read_performative("(\"tell\" :x 1)".as_bytes())?;
    assert_eq!(p.verb(), None);
    let p = read_performative("()".as_bytes())?;
    assert_eq!(p.verb(), None);
    Ok(())
}

#[test]
fn list_for_file() -> Result<()> {
    let mut r = Reader::new("".as_bytes());
    assert_eq!(r.read_list_for_file()?, None);

    let mut r = Reader::new(" (a) \n(b c)\n\n".as_bytes());
    assert_eq!(r.read_list_for_file()?, Some(KqmlList::from(vec![token("a")])));
    assert_eq!(r.read_list_for_file()?,
               Some(KqmlList::from(vec![token("b"), token("c")])));
    assert_eq!(r.read_list_for_file()?, None);

    let mut r = Reader::new("(a) (b".as_bytes());
    assert!(r.read_list_for_file()?.is_some());
    assert!(r.read_list_for_file().unwrap_err().is_incomplete());

    let mut r = Reader::new("  foo".as_bytes());
    let e = r.read_list_for_file().unwrap_err();
    assert!(matches!(e.err, ReadError::BadOpen('f')));
    Ok(())
}

#[test]
fn read_all_lists() -> Result<()> {
    let v = read_all("(tell :content (p x))\n(untell :content (p x))\n".as_bytes())?;
    assert_eq!(v.len(), 2);
    assert_eq!(v[1].head(), Some("untell"));
    Ok(())
}

#[test]
fn errors_name_their_source() {
    let e = read_stream("(a b".as_bytes(), "agent-socket").unwrap_err();
    assert_eq!(e.to_string(),
               "unexpected end of input from (agent-socket)@1.3 after \"(a b\"");

    let e = read_file(Path::new("/nonexistent/messages.kqml")).unwrap_err();
    assert!(e.to_string().starts_with("\"/nonexistent/messages.kqml\": "));
}

#[test]
fn reader_over_existing_stream() -> Result<()> {
    let cs = CharStream::new("(((x)))\n (a)".as_bytes());
    let mut r = Reader::from_stream(cs, &SHALLOW_SETTINGS);
    r.read_performative()?;
    assert_eq!(r.stream().inbuf(), "(((x)))");
    assert_eq!(r.stream().pos(), Pos { line: 0, col: 7 });
    assert_eq!(r.read_performative()?.verb(), Some("a"));
    assert!(r.read_performative().unwrap_err().is_eof());
    r.close();
    Ok(())
}

#[test]
fn error_origin() {
    let e = read_stream("(a b".as_bytes(), "stdin").unwrap_err();
    assert_eq!(e.origin(), &Source::Stream("stdin".into()));
    let path = Path::new("/nonexistent/x.kqml");
    let e = read_file(path).unwrap_err();
    assert_eq!(e.origin(), &Source::File(path.to_path_buf()));
}
