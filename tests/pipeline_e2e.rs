use std::fs;
use std::path::Path;

use texelmap::{
    derive_color, load_dictionary, process, Coordinate, LexiconIndex, PipelineConfig, TexelError,
    WordIndex,
};

const DICTIONARY: &str = "\
3 2
kucing 0.25 0.25
anjing 0.75 0.75
rumah 0.5 0.1
makan 0.1 0.9
broken 0.5
nan-ish abc 0.2
";

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn repeat(word: &str, n: usize) -> String {
    vec![word; n].join(" ")
}

#[test]
fn process_writes_png_of_requested_size() {
    let dir = tempfile::tempdir().unwrap();
    let dict = write(dir.path(), "dict.txt", DICTIONARY);
    let doc = write(
        dir.path(),
        "doc.txt",
        &format!("{} {}", repeat("kucing", 12), repeat("Anjing,", 8)),
    );
    let out = dir.path().join("out.png");

    let load = load_dictionary(&dict).unwrap();
    assert_eq!(load.loaded, 4);
    assert_eq!(load.skipped, 3);

    let report = process(&load.index, &doc, &out, &PipelineConfig::with_resolution(64)).unwrap();
    assert_eq!(report.output.as_deref(), Some(out.as_path()));
    assert_eq!(report.distinct_words, 2);
    assert_eq!(report.exact_matches, 2);

    let img = image::open(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (64, 64));

    // kucing: count 12 -> half extent 3, center (16, 16) plus jitter
    let kucing = derive_color("kucing", 3).unwrap();
    assert_eq!(kucing.to_string(), "#994b1c");
    let painted = img.pixels().filter(|p| p.0 == kucing.rgba()).count();
    assert_eq!(painted, 36);
}

#[test]
fn identical_inputs_give_identical_images() {
    let dir = tempfile::tempdir().unwrap();
    let dict = write(dir.path(), "dict.txt", DICTIONARY);
    let doc = write(
        dir.path(),
        "doc.txt",
        "Kucing makan.\nKucing-kucing makan di rumah, anjing makan juga! kucing kucing kucing kucing kucing makan makan",
    );
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");

    let config = PipelineConfig::default();
    let first = load_dictionary(&dict).unwrap();
    process(&first.index, &doc, &a, &config).unwrap();
    let second = load_dictionary(&dict).unwrap();
    process(&second.index, &doc, &b, &config).unwrap();

    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[test]
fn rare_words_overpaint_frequent_words() {
    let index = LexiconIndex::build([
        ("big", Coordinate::new(0.5, 0.5).unwrap()),
        ("small", Coordinate::new(0.5, 0.5).unwrap()),
    ]);
    // Both signals end near 40, so both blocks are jittered to (56, 56):
    // big covers [46, 66), small covers [54, 58).
    let text = format!("{} {}", repeat("big", 40), repeat("small", 8));
    let config = PipelineConfig::with_resolution(100);

    let (canvas, report) = texelmap::render_text(&index, &text, &config).unwrap();
    assert_eq!(report.painted_blocks, 2);

    let big = derive_color("big", 3).unwrap().rgba();
    let small = derive_color("small", 3).unwrap().rgba();
    assert_eq!(canvas.get_pixel(56, 56).0, small);
    assert_eq!(canvas.get_pixel(47, 47).0, big);
    assert_eq!(canvas.get_pixel(45, 45).0, [0, 0, 0, 0]);
}

#[test]
fn misspelled_words_use_last_approximate_candidate() {
    let index = LexiconIndex::build([
        ("makan", Coordinate::new(0.1, 0.1).unwrap()),
        ("makanan", Coordinate::new(0.9, 0.9).unwrap()),
    ]);
    // "makann": makan is 1 away, makanan is 1 away; structural order puts
    // makan first, so makanan is the last candidate.
    let candidates = index.approximate_lookup("makann", 3);
    assert_eq!(candidates.last().unwrap().word, "makanan");

    let text = repeat("makann", 8);
    let (canvas, report) = texelmap::render_text(&index, &text, &PipelineConfig::with_resolution(10)).unwrap();
    assert_eq!(report.approximate_matches, 1);

    // Placed at (9, 9) plus jitter, so clipped to the bottom-right corner.
    let color = derive_color("makann", 3).unwrap().rgba();
    assert_eq!(canvas.get_pixel(9, 9).0, color);
    assert_eq!(canvas.get_pixel(1, 1).0, [0, 0, 0, 0]);
}

#[test]
fn missing_document_is_fatal_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.png");
    let index = LexiconIndex::new();

    let err = process(&index, dir.path().join("missing.txt"), &out, &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, TexelError::Load(_)));
    assert!(!out.exists());
}

#[test]
fn missing_dictionary_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err: TexelError = load_dictionary(dir.path().join("nope.txt")).unwrap_err().into();
    assert!(err.is_load());
}

#[test]
fn unknown_words_are_counted_not_fatal() {
    let index = LexiconIndex::build([("kucing", Coordinate::new(0.5, 0.5).unwrap())]);
    let (_, report) =
        texelmap::render_text(&index, "kucing xxxxxxxxxxx yyyyyyyyyyyy", &PipelineConfig::default()).unwrap();
    assert_eq!(report.unknown_words, 2);
    assert_eq!(report.exact_matches, 1);
}

#[test]
fn report_serializes_with_dictionary_section() {
    let dir = tempfile::tempdir().unwrap();
    let dict = write(dir.path(), "dict.txt", DICTIONARY);
    let doc = write(dir.path(), "doc.txt", "rumah rumah makan");
    let load = load_dictionary(&dict).unwrap();

    let report = process(&load.index, &doc, dir.path().join("o.png"), &PipelineConfig::default())
        .unwrap()
        .with_dictionary((&load).into());
    let path = dir.path().join("report.json");
    texelmap::pipeline::write_report(&report, &path).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["dictionary"]["loaded"], 4);
    assert_eq!(json["dictionary"]["skipped"], 3);
    assert_eq!(json["distinct_words"], 2);
}
