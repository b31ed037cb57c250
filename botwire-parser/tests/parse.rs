use botwire_parser::errors::{ParamParseError, ParseError, SchemaError};
use botwire_parser::schema::{Category, Tag};
use botwire_parser::{parse_schema, parse_schema_file, schema_version};

#[test]
fn parses_simple_type() {
    let src = "webAppInfo url:string = WebAppInfo;";
    let defs: Vec<_> = parse_schema_file(src).collect::<Result<_, _>>().unwrap();
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].name, "webAppInfo");
    assert_eq!(defs[0].tag, None);
    assert_eq!(defs[0].ty.name, "WebAppInfo");
    assert_eq!(defs[0].params[0].name, "url");
    assert!(!defs[0].params[0].optional);
}

#[test]
fn parses_function_category() {
    let src = "
---functions---
getMe = User;
";
    let defs: Vec<_> = parse_schema_file(src).collect::<Result<_, _>>().unwrap();
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].category, Category::Functions);
    assert_eq!(defs[0].name, "getMe");
    assert!(defs[0].params.is_empty());
}

#[test]
fn parses_optional_and_vector_parameters() {
    let src = "inlineKeyboardMarkup inline_keyboard:Vector<Vector<InlineKeyboardButton>> note:?string = InlineKeyboardMarkup;";
    let defs: Vec<_> = parse_schema_file(src).collect::<Result<_, _>>().unwrap();
    let params = &defs[0].params;
    assert_eq!(params.len(), 2);
    assert!(params[0].ty.is_vector());
    assert_eq!(params[0].ty.element().name, "InlineKeyboardButton");
    assert!(params[1].optional);
    assert_eq!(params[1].ty.name, "string");
}

#[test]
fn parses_discriminators() {
    let src = "
inlineQueryResultContact#contact id:string = InlineQueryResult;
chatMemberOwner#status=creator user:User = ChatMember;
inputTextMessageContent@message_text message_text:string = InputMessageContent;
";
    let defs: Vec<_> = parse_schema_file(src).collect::<Result<_, _>>().unwrap();
    assert_eq!(
        defs[0].tag,
        Some(Tag::Field { key: "type".into(), value: "contact".into() })
    );
    assert_eq!(
        defs[1].tag,
        Some(Tag::Field { key: "status".into(), value: "creator".into() })
    );
    assert_eq!(defs[2].tag, Some(Tag::Presence { key: "message_text".into() }));
    assert_eq!(defs[2].tag.as_ref().unwrap().value(), "message_text");
}

#[test]
fn multi_line_definition() {
    let src = "
menuButtonWebApp#web_app
    text:string
    web_app:WebAppInfo = MenuButton;
";
    let defs: Vec<_> = parse_schema_file(src).collect::<Result<_, _>>().unwrap();
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].params.len(), 2);
}

#[test]
fn skips_blank_lines_and_comments() {
    let src = "
// this is a comment
webAppInfo url:string = WebAppInfo;
// another comment

callbackGame = CallbackGame;
";
    let defs: Vec<_> = parse_schema_file(src).collect::<Result<_, _>>().unwrap();
    assert_eq!(defs.len(), 2);
}

#[test]
fn display_reproduces_source() {
    let src = "inlineQueryResultGame#game id:string reply_markup:?InlineKeyboardMarkup = InlineQueryResult;";
    let def = parse_schema_file(src).next().unwrap().unwrap();
    assert_eq!(format!("{def};"), src);
}

#[test]
fn rejects_missing_type() {
    let err = parse_schema_file("user id:long;").next().unwrap().unwrap_err();
    assert_eq!(err.error, ParseError::MissingType);
}

#[test]
fn rejects_misplaced_optional_marker() {
    let err = parse_schema_file("user id:lo?ng = User;").next().unwrap().unwrap_err();
    assert_eq!(err.error, ParseError::InvalidParam(ParamParseError::InvalidOptional));
}

#[test]
fn rejects_parameter_shadowing_discriminator() {
    let err = parse_schema_file("menuButtonDefault#default type:string = MenuButton;")
        .next()
        .unwrap()
        .unwrap_err();
    assert_eq!(err.error, ParseError::DuplicateParam("type".into()));
}

#[test]
fn rejects_presence_key_not_declared() {
    let err = parse_schema_file("inputContactMessageContent@phone_number first_name:string = InputMessageContent;")
        .next()
        .unwrap()
        .unwrap_err();
    assert!(matches!(err.error, ParseError::InvalidParam(ParamParseError::InvalidName { .. })));
}

#[test]
fn rejects_malformed_tag() {
    let err = parse_schema_file("a#Bad x:int = A;").next().unwrap().unwrap_err();
    assert_eq!(err.error, ParseError::InvalidTag("a#Bad".into()));
}

#[test]
fn version_header_is_read() {
    assert_eq!(schema_version("// VERSION 6.3\n---functions---\ngetMe = User;"), Some("6.3"));
}

#[test]
fn errors_point_at_the_definition_start() {
    let src = "// VERSION 6.3
webAppInfo url:string = WebAppInfo;

menuButtonWebApp#web_app
    text:string
    web_app:WebAppInfo = MenuButton;
inlineQueryResultGame#Game id:string = InlineQueryResult;
";
    let results: Vec<_> = parse_schema_file(src).collect();
    assert_eq!(results.len(), 3);
    assert!(results[1].is_ok());
    assert_eq!(
        results[2],
        Err(SchemaError { line: 7, error: ParseError::InvalidTag("inlineQueryResultGame#Game".into()) })
    );
    assert_eq!(
        results[2].as_ref().unwrap_err().to_string(),
        "line 7: invalid discriminator: \"inlineQueryResultGame#Game\""
    );
}

#[test]
fn missing_semicolon_at_end_of_input() {
    let src = "webAppInfo url:string = WebAppInfo;\nloginUrl url:string = LoginUrl\n";
    let results: Vec<_> = parse_schema_file(src).collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1], Err(SchemaError { line: 2, error: ParseError::Unterminated }));
}

#[test]
fn missing_semicolon_before_section_marker() {
    let src = "webAppInfo url:string = WebAppInfo\n---functions---\ngetMe = User;";
    let results: Vec<_> = parse_schema_file(src).collect();
    assert_eq!(results[0], Err(SchemaError { line: 1, error: ParseError::Unterminated }));
    assert_eq!(results[1].as_ref().unwrap().category, Category::Functions);
}

#[test]
fn rejects_unknown_section() {
    let err = parse_schema_file("\n---methods---\ngetMe = User;").next().unwrap().unwrap_err();
    assert_eq!(err, SchemaError { line: 2, error: ParseError::UnknownSection("methods".into()) });
}

#[test]
fn whole_file_parse_fails_on_any_bad_member() {
    let good = "
inlineQueryResultContact#contact id:string = InlineQueryResult;
inlineQueryResultGame#game id:string = InlineQueryResult;
";
    assert_eq!(parse_schema(good).unwrap().len(), 2);

    let bad = good.replace("#game", "#Game");
    let errors = parse_schema(&bad).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line, 3);
}

#[test]
fn whole_file_parse_reports_every_error() {
    let src = "a#Bad x:int = A;\nb y:long = B;\nc z:lo?ng = C;";
    let lines: Vec<_> = parse_schema(src).unwrap_err().iter().map(|e| e.line).collect();
    assert_eq!(lines, [1, 3]);
}
