/* src/server/scriptify/rust/src/tests/scenarios.rs */

use super::*;
use serde_json::json;

#[test]
fn escaped_literal_and_client_unescape() {
  let html = render(json!({"a": "<b>"}), &ScriptifyOptions::default());
  assert!(html.contains(r#"window.SAILS_LOCALS = { ["a"]: unescape("&lt;b&gt;"), }"#));
  assert!(html.contains("function unescape(v)"));
}

#[test]
fn self_cycle_renders_marker() {
  let obj = Value::object([("name", Value::from("x"))]);
  obj.insert("self", obj.clone());
  let mut data = Locals::new();
  data.insert("x".into(), obj);

  let html = render_script_tag(&data, &ScriptifyOptions::default()).unwrap();
  assert!(html.contains(r#"["x"]: unescape(JSON.parse("{\"name\":\"x\",\"self\":\"[Circular ~]\"}")), "#));
}

#[test]
fn keys_restrict_output() {
  let opts = ScriptifyOptions { keys: Some(vec!["a".into()]), ..Default::default() };
  let html = render(json!({"a": 1, "b": 2}), &opts);
  assert!(html.contains(r#"["a"]: unescape(1), "#));
  assert!(!html.contains(r#""b""#));
}

#[test]
fn custom_namespace() {
  let opts = ScriptifyOptions { namespace: "MY_NS".into(), ..Default::default() };
  let html = render(json!({"a": 1}), &opts);
  assert!(html.contains("window.MY_NS = { "));
  assert!(!html.contains("SAILS_LOCALS"));
}

#[test]
fn undefined_locals_are_absent_but_null_is_kept() {
  let mut data = Locals::new();
  data.insert("gone".into(), Value::Undefined);
  data.insert("handle".into(), Value::from(Opaque::Handle { type_name: "Socket".into() }));
  data.insert("nothing".into(), Value::Null);

  let html = render_script_tag(&data, &ScriptifyOptions::default()).unwrap();
  assert!(!html.contains("gone"));
  assert!(!html.contains("handle"));
  assert!(html.contains(r#"["nothing"]: unescape(null), "#));
}

#[test]
fn csrf_and_user_example() {
  let opts = ScriptifyOptions { dont_unescape_on_client: true, ..Default::default() };
  let html = render(
    json!({
      "_csrf": "d8a831-d8a8381h1-adgadga3",
      "me": {"gravatarUrl": "</script>", "admin": false}
    }),
    &opts,
  );
  assert_eq!(
    html,
    concat!(
      r#"<script type="text/javascript">(function () { window.SAILS_LOCALS = { "#,
      r#"["_csrf"]: "d8a831-d8a8381h1-adgadga3", "#,
      r#"["me"]: JSON.parse("{\"admin\":false,\"gravatarUrl\":\"&lt;/script&gt;\"}"), "#,
      "}; })();</script>"
    )
  );
}

#[test]
fn round_trip_restores_original_values() {
  let original = json!({
    "title": "Tom & Jerry's <show>",
    "quote": "\"&amp;\" is already an entity",
    "nested": [{"deep": ["<", ">", "&lt;"]}, 1.5, true, null],
    "empty": ""
  });
  assert_eq!(round_trip(&Value::from(original.clone())), original);
}

#[test]
fn shared_subtree_round_trips_in_both_places() {
  let shared = Value::array([Value::from("<i>")]);
  let root = Value::object([("a", shared.clone()), ("b", shared)]);
  assert_eq!(round_trip(&root), json!({"a": ["<i>"], "b": ["<i>"]}));
}

#[test]
fn json_entry_point_matches_typed_entry_point() {
  let data = json!({"list": [1, "two", {"three": "<3>"}]});
  let opts = ScriptifyOptions { namespace: "APP".into(), ..Default::default() };
  let typed = render(data.clone(), &opts);
  let via_json =
    render_script_tag_json(&data.to_string(), &serde_json::to_string(&opts).unwrap()).unwrap();
  assert_eq!(typed, via_json);
}

#[test]
fn proto_keys_survive_evaluation() {
  let data = json!({
    "__proto__": {"injected": "yes"},
    "me": {"__proto__": {"isAdmin": true}, "name": "Tom & <Jerry>'s \"x\""},
    "list": [{"__proto__": null}, "</script>"],
    "plain": "a\u{2028}b"
  });
  for dont_unescape_on_client in [false, true] {
    let opts = ScriptifyOptions { dont_unescape_on_client, ..Default::default() };
    let locals = evaluate_locals(&render(data.clone(), &opts), DEFAULT_NAMESPACE);
    let keys: Vec<&str> = locals.keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 4);
    for key in ["__proto__", "list", "me", "plain"] {
      assert!(keys.contains(&key), "{key} missing");
    }
    if !dont_unescape_on_client {
      assert_eq!(serde_json::Value::Object(locals), data);
    }
  }
}

#[test]
fn evaluated_tag_matches_input_for_every_option_set() {
  let data = json!({
    "title": "Tom & Jerry's <show>",
    "nested": {"deep": [["&amp;", "\u{2029}"], {"k<": "v>"}]},
    "n": -1.5,
    "flag": false,
    "none": null
  });
  let opts = ScriptifyOptions { namespace: "APP".into(), ascii_only: true, ..Default::default() };
  let html = render(data.clone(), &opts);
  assert!(html.is_ascii());
  assert_eq!(serde_json::Value::Object(evaluate_locals(&html, "APP")), data);
}
