use wiki_info::normalize::deal_item_text;
use wiki_info::{run_pipeline, Category, Pipe, PipeArgs};

fn pipes(names: &[&str]) -> Vec<Pipe> {
    names.iter().map(|n| n.parse().unwrap()).collect()
}

#[test]
fn numeric_groups_survive_pn() {
    let out = run_pipeline("BADON (1) (ビッグガンガンコミックス)", &pipes(&["pn"]), &PipeArgs::default());
    assert_eq!(out, "BADON (1)");
}

#[test]
fn p_removes_every_group() {
    let out = run_pipeline("BADON (1)（限定版）", &pipes(&["p"]), &PipeArgs::default());
    assert_eq!(out, "BADON");
}

#[test]
fn empty_pipeline_returns_trimmed_raw() {
    assert_eq!(run_pipeline("\n  BADON (1)  ", &[], &PipeArgs::default()), "BADON (1)");
}

#[test]
fn pipeline_emptying_text_falls_back_to_raw() {
    let out = run_pipeline(" no digits here ", &pipes(&["num"]), &PipeArgs::default());
    assert_eq!(out, "no digits here");
}

#[test]
fn keyword_and_date_stages() {
    let args = PipeArgs::with_keywords(["発売日"]);
    let out = run_pipeline("発売日： 2020/1/1", &pipes(&["k", "date"]), &args);
    assert_eq!(out, "2020-01-01");
}

#[test]
fn trim_all_removes_inner_whitespace() {
    let out = run_pipeline(" 978 4757 563432 ", &pipes(&["ta"]), &PipeArgs::default());
    assert_eq!(out, "9784757563432");
}

#[test]
fn unknown_stage_name_is_rejected() {
    assert!("nope".parse::<Pipe>().is_err());
}

#[test]
fn normalizer_leaves_titles_alone() {
    let keywords = vec!["发售日".to_string()];
    for category in [Category::SubjectTitle, Category::SubjectSummary] {
        assert_eq!(deal_item_text("发售日: (x) 2020", &category, &keywords), "发售日: (x) 2020");
    }
}

#[test]
fn normalizer_strips_keyword_label_and_groups() {
    let keywords = vec!["发售日".to_string()];
    assert_eq!(deal_item_text("发售日: 2020-01-01", &Category::Date, &keywords), "2020-01-01");
    assert_eq!(deal_item_text("出版社：講談社 (2020/1/1)", &Category::Default, &[]), "講談社");
}
