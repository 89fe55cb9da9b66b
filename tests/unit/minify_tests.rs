// Minification engine unit tests

use htmlmin::minify::{minify, tokenize, HtmlMinifier, MinifyOptions, Token, PRESERVE_TAGS};
use rstest::rstest;

const SAMPLES: &[&str] = &[
    "<html>   <body>some text here</body>    </html>",
    "<html> <!-- some comment --><body>some text here</body> </html>",
    "\n\n<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n    <title> Hi </title>\n  </head>\n</html>\n",
    "<p>a <!-- x -->\n\n b <!-- y --> <!-- z -->  c</p>",
    "<div>\t<pre>\n  keep   me\n</pre>\t<textarea>  a\n b </textarea>  </div>",
    "<script>\n  if (a < b && c > d) { x(); }\n</script>\n<style>\n  p > a { color: red; }\n</style>",
    "<a title=\"x > y\"   href='/q?a>b'>  link  </a>",
    "text before   <p>unterminated <div class=\"x",
    "a <!-- never closed   ",
    "<pre>  open forever   ",
    "1 < 2   and   3 > 2",
    "<p>héllo   wörld — ünïcödé</p>\n",
    "",
    "   ",
    "<<!---->a x='<p y='>'   z>",
    "<<!---->p title='<pre>'>  a  </pre>  b  ",
    "x <<!-- a --><!-- b -->/div>  y",
];

#[rstest]
#[case(true)]
#[case(false)]
fn test_minify_is_idempotent(#[case] keep_comments: bool) {
    for sample in SAMPLES {
        let once = minify(sample, keep_comments);
        let twice = minify(&once, keep_comments);
        assert_eq!(once, twice, "not idempotent for {:?}", sample);
    }
}

#[rstest]
#[case("<a> <b>", "<a> <b>")]
#[case("<a>\n<b>", "<a> <b>")]
#[case("<a>\t \r\n <b>", "<a> <b>")]
#[case("<a>\n\n\n        <b>", "<a> <b>")]
#[case("<a><b>", "<a><b>")]
fn test_whitespace_between_tags_becomes_one_space(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(minify(input, false), expected);
}

#[test]
fn test_preserve_regions_are_byte_identical() {
    for tag in PRESERVE_TAGS {
        let region = format!("<{tag} id=\"k\">\n   a  <!-- c -->\n\t b\n</{tag}>");
        let html = format!("<div>   {region}   </div>");
        let out = minify(&html, false);
        assert_eq!(out, format!("<div> {region} </div>"), "tag {tag}");
    }
}

#[test]
fn test_uppercase_preserve_tags() {
    let html = "<PRE>  x  </PRE>  <Script>  y  </SCRIPT>";
    assert_eq!(minify(html, false), "<PRE>  x  </PRE> <Script>  y  </SCRIPT>");
}

#[test]
fn test_comment_like_text_inside_script_survives_stripping() {
    let html = "<script><!--\nvar a  =  1;\n//--></script>";
    assert_eq!(minify(html, false), html);
}

#[test]
fn test_conditional_comments_are_treated_like_comments() {
    let html = "<head> <!--[if IE]><link rel=\"stylesheet\" href=\"ie.css\"><![endif]--> </head>";
    assert_eq!(minify(html, false), "<head> </head>");
    assert_eq!(minify(html, true), html);
}

#[test]
fn test_stripped_comment_is_not_replaced_by_space() {
    assert_eq!(minify("<a><!-- x --><b>", false), "<a><b>");
}

#[test]
fn test_tags_and_attributes_never_change() {
    let html = "<input  type=\"text\"\n  value=\"  two  spaces  \"  disabled >";
    assert_eq!(minify(html, false), html);
}

#[test]
fn test_unterminated_markup_passes_through_verbatim() {
    assert_eq!(
        minify("<p>a   b</p>   <div class=\"x   y", false),
        "<p>a b</p> <div class=\"x   y"
    );
    assert_eq!(minify("<p>  </p><!--  x  ", true), "<p> </p><!--  x  ");
}

#[test]
fn test_output_never_longer_than_input() {
    for sample in SAMPLES {
        assert!(minify(sample, true).len() <= sample.len());
        assert!(minify(sample, false).len() <= sample.len());
    }
}

#[test]
fn test_tokenizer_roundtrip_on_samples() {
    for sample in SAMPLES {
        let joined: String = tokenize(sample).iter().map(Token::as_str).collect();
        assert_eq!(&joined, sample);
    }
}

#[test]
fn test_minifier_struct_matches_function() {
    let minifier = HtmlMinifier::new(MinifyOptions::new(true));
    for sample in SAMPLES {
        assert_eq!(minifier.minify(sample), minify(sample, true));
    }
}
