use wiki_info::selector::Selector;
use wiki_info::sites::amazon;
use wiki_info::{get_query_info, get_wiki_data_from_html, Category, FieldConfig, Pipe, Site, SiteConfig};

fn value_of<'a>(infos: &'a [wiki_info::SingleInfo], name: &str) -> Option<&'a str> {
    infos.iter().find(|i| i.name == name).map(|i| i.value.as_str())
}

#[test]
fn date_field_without_pipeline_is_normalized() {
    let site = Site::new(SiteConfig {
        key: "shop".to_string(),
        item_list: vec![FieldConfig::new(
            "发售日",
            Category::Date,
            vec![Selector::new("#info").sub("p").key_word(["发售日"])],
        )],
        ..SiteConfig::default()
    });
    let html = r#"<div id="info"><p>价格: 1000</p><p>发售日: 2020-01-01</p></div>"#;

    let infos = get_wiki_data_from_html(&site, html, None);
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].value, "2020-01-01");
    assert_eq!(infos[0].category, Category::Date);
}

#[test]
fn slash_dates_become_canonical() {
    let site = Site::new(SiteConfig {
        item_list: vec![FieldConfig::new(
            "发售日",
            Category::Date,
            vec![Selector::new("#info").sub("p").key_word(["発売日"])],
        )],
        ..SiteConfig::default()
    });
    let infos = get_wiki_data_from_html(&site, r#"<div id="info"><p>発売日：2021/3/5</p></div>"#, None);
    assert_eq!(value_of(&infos, "发售日"), Some("2021-03-05"));
}

#[test]
fn absent_fields_do_not_block_others() {
    let site = Site::new(SiteConfig {
        item_list: vec![
            FieldConfig::new("名称", Category::SubjectTitle, vec![Selector::new("h1")]),
            FieldConfig::new("ISBN", Category::Isbn, vec![Selector::new("#isbn")]),
            FieldConfig::new("备注", Category::Default, vec![Selector::new("#note")]),
            FieldConfig::new("作者", Category::Creator, vec![Selector::new(".author")]),
        ],
        ..SiteConfig::default()
    });
    let html = r#"<h1>BADON</h1><p id="note">   </p><span class="author">オノ ナツメ</span>"#;

    let infos = get_wiki_data_from_html(&site, html, None);
    let names: Vec<&str> = infos.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["名称", "作者"]);
    assert_eq!(value_of(&infos, "作者"), Some("オノナツメ"));
}

#[test]
fn pipelines_and_custom_stages_run_in_order() {
    fn shout(pipe: wiki_info::TextPipe) -> wiki_info::TextPipe {
        let upper = pipe.current().to_uppercase();
        pipe.with_out(upper)
    }

    let site = Site::new(SiteConfig {
        item_list: vec![
            FieldConfig::new("名称", Category::SubjectTitle, vec![Selector::new("h1")])
                .pipes([Pipe::ParenthesisNumeric, Pipe::Custom(shout)]),
            FieldConfig::new("页数", Category::Default, vec![Selector::new("ul").sub("li").key_word(["ページ数"])])
                .pipes([Pipe::Keywords, Pipe::Number]),
        ],
        ..SiteConfig::default()
    });
    let html = r#"<h1> badon (1) (ビッグガンガンコミックス) </h1><ul><li>ページ数: 192ページ</li></ul>"#;

    let infos = get_wiki_data_from_html(&site, html, None);
    assert_eq!(value_of(&infos, "名称"), Some("BADON (1)"));
    assert_eq!(value_of(&infos, "页数"), Some("192"));
}

const AMAZON_PAGE: &str = r#"
<html><body>
  <div id="nav-subnav"><a class="nav-a-content">本</a></div>
  <div id="dp" class="book">
    <div id="title"><span id="productTitle">
        動物のおしゃべり　（１） (バンブーコミックス 4コマセレクション)
    </span></div>
    <div id="bylineInfo"><span class="author"><a href="/e/1">石井 和代</a></span></div>
    <div id="imgBlkFront"><img src="/images/s.jpg" data-old-hires="https://m.media-amazon.com/images/l.jpg"></div>
    <div id="detailBullets_feature_div"><ul class="detail-bullet-list">
      <li><span class="a-text-bold">出版社 :</span> <span>竹書房 (2013/2/27)</span></li>
      <li><span class="a-text-bold">発売日 :</span> <span>2013/2/27</span></li>
      <li><span class="a-text-bold">コミック :</span> <span>120ページ</span></li>
      <li><span class="a-text-bold">ISBN-13 :</span> <span>978-4812479920</span></li>
      <li><span class="a-text-bold">ASIN :</span> <span>4812479922</span></li>
    </ul></div>
    <div id="bookDescription_feature_div"><div class="a-expander-content"><p>第一話</p><p>第二話</p></div></div>
  </div>
</body></html>
"#;

#[test]
fn amazon_book_page() {
    let site = amazon::book_model();
    let infos = get_wiki_data_from_html(&site, AMAZON_PAGE, Some("https://www.amazon.co.jp/dp/4812479922"));

    assert_eq!(value_of(&infos, "名称"), Some("動物のおしゃべり　（１）"));
    assert_eq!(value_of(&infos, "作者"), Some("石井和代"));
    assert_eq!(value_of(&infos, "cover"), Some("https://m.media-amazon.com/images/l.jpg"));
    assert_eq!(value_of(&infos, "出版社"), Some("竹書房"));
    assert_eq!(value_of(&infos, "发售日"), Some("2013-02-27"));
    assert_eq!(value_of(&infos, "页数"), Some("120"));
    assert_eq!(value_of(&infos, "ISBN"), Some("978-4812479920"));
    assert_eq!(value_of(&infos, "ASIN"), Some("4812479922"));
    assert_eq!(value_of(&infos, "内容简介"), Some("第一話\n第二話"));

    let query = get_query_info(&infos);
    assert_eq!(query.name.as_deref(), Some("動物のおしゃべり　（１）"));
    assert_eq!(query.release_date.as_deref(), Some("2013-02-27"));
    assert_eq!(query.isbn.as_deref(), Some("978-4812479920"));
    assert_eq!(query.asin.as_deref(), Some("4812479922"));
}
