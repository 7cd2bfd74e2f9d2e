// tests/properties.rs
//
// End-to-end behavior of the four operations through the crate-level entry points.

use prettymin::{
    css_minify, css_prettify, entities, html_minify, html_prettify, Operation,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const CSS_SAMPLES: &[&str] = &[
    "a{color:red;background:blue}",
    "h1,h2 , h3{margin:0 auto;padding : 1px 2px}",
    "@media screen and (max-width:600px){.nav a:hover{text-decoration:underline}}",
    "/* banner */\nbody{font:12px/1.5 \"Helvetica Neue\",sans-serif}",
    ".a{&:focus{outline:none}}",
    "a{width:calc(100% - 2 * var(--gap))}",
];

const HTML_DOC: &str = "<!DOCTYPE html><html><head><title>T &amp; C</title>\
    <style>a{color:red}</style></head><body><div class=\"x\"><p>Hello <b>world</b></p>\
    <ul><li>a<li>b</ul><img src=\"a.png\"><br/><section><h2>Sub</h2><span>s</span></section>\
    </div></body></html>";

/* ============================== Examples =============================== */

#[test]
fn css_prettify_example() {
    init();
    assert_eq!(
        css_prettify("a{color:red;background:blue}").unwrap(),
        "a {\n\tcolor: red;\n\tbackground: blue;\n}\n"
    );
}

#[test]
fn css_minify_example() {
    init();
    assert_eq!(css_minify("a {\n  color: red;\n}\n").unwrap(), "a{color:red}");
}

#[test]
fn html_prettify_collapses_paragraph_only() {
    init();
    assert_eq!(
        html_prettify("<div><p>Hi</p></div>").unwrap(),
        "<div>\n\t<p>Hi</p>\n</div>"
    );
}

#[test]
fn html_prettify_auto_closes_list_items() {
    init();
    assert_eq!(
        html_prettify("<ul><li>a<li>b</ul>").unwrap(),
        "<ul>\n\t<li>a</li>\n\t<li>b</li>\n</ul>"
    );
}

#[test]
fn html_minify_example() {
    init();
    assert_eq!(
        html_minify("<p>  a  </p>\n<p>b</p>").unwrap(),
        "<p> a </p><p>b</p>"
    );
}

#[test]
fn style_block_is_indented_below_its_parent() {
    init();
    assert_eq!(
        html_prettify("<div><style>color:red</style></div>").unwrap(),
        "<div>\n\t<style>\n\t\tcolor: red;\n\t</style>\n</div>"
    );
}

#[test]
fn entity_examples() {
    assert_eq!(entities::decode("&amp;", false), "&amp;");
    assert_eq!(entities::decode("&lt;", false), "&lt;");
    assert_eq!(entities::decode("&copy;", false), "\u{00A9}");
    assert_eq!(entities::decode("&#65;", false), "A");
    assert_eq!(entities::decode("&#x41;", false), "A");
}

/* ============================= Properties ============================== */

#[test]
fn css_prettify_is_idempotent() {
    init();
    for css in CSS_SAMPLES {
        let once = css_prettify(css).unwrap();
        assert_eq!(css_prettify(&once).unwrap(), once, "input: {css}");
    }
}

#[test]
fn html_prettify_is_idempotent() {
    init();
    let once = html_prettify(HTML_DOC).unwrap();
    assert_eq!(html_prettify(&once).unwrap(), once);
}

#[test]
fn minify_removes_prettify_layout() {
    init();
    // calc() operator spacing is added content, not layout, so it is left out here.
    for css in &CSS_SAMPLES[..5] {
        let pretty = css_prettify(css).unwrap();
        assert_eq!(
            css_minify(&pretty).unwrap(),
            css_minify(css).unwrap(),
            "input: {css}"
        );
    }
}

#[test]
fn html_indentation_tracks_open_elements() {
    init();
    let out = html_prettify(HTML_DOC).unwrap();
    let mut depth = 0usize;
    let mut in_style = false;
    for line in out.lines() {
        let tabs = line.bytes().take_while(|&b| b == b'\t').count();
        let body = line.trim_start_matches('\t');

        if in_style {
            if body == "</style>" {
                in_style = false;
                assert_eq!(tabs, depth, "{line:?}");
            } else {
                assert!(tabs > depth, "{line:?}");
            }
            continue;
        }
        if body.starts_with("<!DOCTYPE") {
            assert_eq!(tabs, 0);
            continue;
        }
        if body.starts_with("</") {
            depth = depth.checked_sub(1).expect("depth went negative");
            assert_eq!(tabs, depth, "{line:?}");
            continue;
        }
        assert_eq!(tabs, depth, "{line:?}");
        if body.starts_with("<style") {
            in_style = true;
            continue;
        }
        let opens = body.starts_with('<')
            && !body.contains("</")
            && !body.ends_with("/>")
            && !body.starts_with("<img")
            && !body.starts_with("<br");
        if opens {
            depth += 1;
        }
    }
    assert_eq!(depth, 0);
}

#[test]
fn html_prettify_full_document() {
    init();
    assert_eq!(
        html_prettify(HTML_DOC).unwrap(),
        "<!DOCTYPE html>\n\
         <html>\n\
         \t<head>\n\
         \t\t<title>T &amp; C</title>\n\
         \t\t<style>\n\
         \t\t\ta {\n\
         \t\t\t\tcolor: red;\n\
         \t\t\t}\n\
         \t\t</style>\n\
         \t</head>\n\
         \t<body>\n\
         \t\t<div class=\"x\">\n\
         \t\t\t<p>Hello <b>world</b></p>\n\
         \t\t\t<ul>\n\
         \t\t\t\t<li>a</li>\n\
         \t\t\t\t<li>b</li>\n\
         \t\t\t</ul>\n\
         \t\t\t<img src=\"a.png\">\n\
         \t\t\t<br/>\n\
         \t\t\t<section>\n\
         \t\t\t\t<h2>Sub</h2>\n\
         \t\t\t\t<span>\n\
         \t\t\t\t\ts\n\
         \t\t\t\t</span>\n\
         \t\t\t</section>\n\
         \t\t</div>\n\
         \t</body>\n\
         </html>"
    );
}

/* ============================== Boundary =============================== */

#[test]
fn operations_dispatch_by_name() {
    init();
    let op: Operation = "css-minify".parse().unwrap();
    assert_eq!(op.apply("a { b: c; }"), Ok("a{b:c}".to_string()));
    assert_eq!(op.to_string(), "css-minify");
}

#[test]
fn malformed_input_degrades_instead_of_failing() {
    init();
    for text in ["a{{{", "}}}", "/* open", "\"open", "a:b:c;;{", ""] {
        assert!(css_prettify(text).is_ok(), "{text:?}");
    }
    for text in ["<div", "</p></p>", "<a title=\"x>", "<!-- open", "<<>>", ""] {
        assert!(html_prettify(text).is_ok(), "{text:?}");
    }
}

#[test]
fn verbatim_content_survives_close_tag_lookalikes() {
    init();
    for html in ["<script>var a = \"</\" + n;</script>", "<pre>1 </ 2 isn't</pre>"] {
        assert_eq!(html_prettify(html).unwrap(), html);
    }
}

#[test]
fn attribute_whitespace_folds_like_text() {
    init();
    assert_eq!(
        html_prettify("<a href=\"x\"   title=\"a   b\">x</a>").unwrap(),
        "<a href=\"x\" title=\"a b\">\n\tx\n</a>"
    );
}
