// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.

//! Extract a small district from pages marked up the way volby.cz marks them up.

use std::path::Path;
use scraper::Html;
use czech::get_volby_layout_ps2017;
use czech::parse_volby::VolbyCzLayout;
use results::download::InMemoryPages;
use results::errors::{ScrapeError, StructuralIssue};
use results::layout::ResultsPageLayout;
use results::municipality::{ElectoralCounters, MunicipalityCode, PartyVotes};
use results::pipeline::{run, ExtractOptions};

const DISTRICT_LIST : &str = "https://volby.cz/pls/ps2017nss/ps3?xjazyk=CZ";
const BENESOV_DISTRICT : &str = "https://volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101";
const BENESOV : &str = "https://volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xkraj=2&xobec=529303&xvyber=2101";
const BERNARTICE : &str = "https://volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xkraj=2&xobec=529311&xvyber=2101";

fn district_list_page() -> String {
    r#"<html><body><h1>Volby do Poslanecké sněmovny Parlamentu České republiky konané ve dnech 20.10. – 21.10.2017</h1>
<table class="table">
<tr><th id="t1sa1">Kód</th><th id="t1sa2">Okres</th><th id="t1sa3">Výběr obce</th></tr>
<tr><td class="cislo" headers="t1sa1"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xnumnuts=2101">CZ0201</a></td><td headers="t1sa2">Benešov</td><td class="center" headers="t1sa3"><a href="ps32?xjazyk=CZ&amp;xkraj=2&amp;xnumnuts=2101">X</a></td></tr>
<tr><td class="cislo" headers="t1sa1"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xnumnuts=2102">CZ0202</a></td><td headers="t1sa2">Beroun</td><td class="center" headers="t1sa3"><a href="ps32?xjazyk=CZ&amp;xkraj=2&amp;xnumnuts=2102">X</a></td></tr>
</table>
<p><a href="ps36?xjazyk=CZ">Zahraničí</a></p>
</body></html>"#.to_string()
}

fn listing_row(code:&str,name:&str) -> String {
    format!(r#"<tr><td class="cislo" headers="t1sa1 t1sb1"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec={code}&amp;xvyber=2101">{code}</a></td><td class="overflow_name" headers="t1sa1 t1sb2">{name}</td><td class="center" headers="t1sa2"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec={code}&amp;xvyber=2101">X</a></td></tr>"#)
}

/// A listing page with the municipalities split over two tables, as volby.cz does.
fn listing_page(municipalities:&[(&str,&str)]) -> String {
    let heading = r#"<tr><th id="t1sa1" colspan="2">Obec</th><th id="t1sa2" rowspan="2">Výběr okrsku</th></tr><tr><th id="t1sb1">číslo</th><th id="t1sb2">název</th></tr>"#;
    let (left,right) = municipalities.split_at(municipalities.len().div_ceil(2));
    let rows = |m:&[(&str,&str)]| m.iter().map(|(code,name)|listing_row(code,name)).collect::<String>();
    format!(r#"<html><body><h3>Okres: Benešov</h3>
<div class="t3"><table class="table">{heading}{}</table></div>
<div class="t3"><table class="table">{heading}{}</table></div>
</body></html>"#,rows(left),rows(right))
}

fn party_row(table:usize,number:usize,name:&str,votes:&str) -> String {
    format!(r#"<tr><td class="cislo" headers="t{table}sa1 t{table}sb1">{number}</td><td class="overflow_name" headers="t{table}sa1 t{table}sb2">{name}</td><td class="cislo" headers="t{table}sa2 t{table}sb3">{votes}</td><td class="cislo" headers="t{table}sa2 t{table}sb4">0,00</td></tr>"#)
}

/// A detail page. Parties are split between the left and right tables, first half on the left.
fn detail_page(voters:&str,envelopes:&str,valid:&str,parties:&[(&str,&str)]) -> String {
    let (left,right) = parties.split_at(parties.len().div_ceil(2));
    let rows = |table:usize,first:usize,p:&[(&str,&str)]| p.iter().enumerate().map(|(i,(name,votes))|party_row(table,first+i+1,name,votes)).collect::<String>();
    format!(r#"<html><body><h3>Obec: Benešov</h3>
<table class="table" id="ps311_t1">
<tr><th id="sa1" colspan="3">Okrsky</th><th id="sa2" rowspan="2">Voliči v seznamu</th><th id="sa3" rowspan="2">Vydané obálky</th><th id="sa4" rowspan="2">Volební účast v %</th><th id="sa5" rowspan="2">Odevzdané obálky</th><th id="sa6" rowspan="2">Platné hlasy</th><th id="sa7" rowspan="2">% platných hlasů</th></tr>
<tr><th id="sb1">celkem</th><th id="sb2">zpr.</th><th id="sb3">v %</th></tr>
<tr><td class="cislo" headers="sa1 sb1">1</td><td class="cislo" headers="sa1 sb2">1</td><td class="cislo" headers="sa1 sb3">100,00</td><td class="cislo" headers="sa2">{voters}</td><td class="cislo" headers="sa3">{envelopes}</td><td class="cislo" headers="sa4">80,00</td><td class="cislo" headers="sa5">{envelopes}</td><td class="cislo" headers="sa6">{valid}</td><td class="cislo" headers="sa7">98,75</td></tr>
</table>
<div id="inner">
<div class="t2_470"><table class="table">
<tr><th id="t1sa1" colspan="2">Strana</th><th id="t1sa2" colspan="2">Platné hlasy</th></tr>
<tr><th id="t1sb1">číslo</th><th id="t1sb2">název</th><th id="t1sb3">celkem</th><th id="t1sb4">v %</th></tr>
{}
</table></div>
<div class="t2_470"><table class="table">
<tr><th id="t2sa1" colspan="2">Strana</th><th id="t2sa2" colspan="2">Platné hlasy</th></tr>
<tr><th id="t2sb1">číslo</th><th id="t2sb2">název</th><th id="t2sb3">celkem</th><th id="t2sb4">v %</th></tr>
{}
</table></div>
</div>
</body></html>"#,rows(1,0,left),rows(2,left.len(),right))
}

/// The two municipality example : Benešov and Bernartice with three parties.
fn benesov_pages() -> InMemoryPages {
    let mut pages = InMemoryPages::new();
    pages.insert(DISTRICT_LIST,district_list_page()).unwrap();
    pages.insert(BENESOV_DISTRICT,listing_page(&[("529303","Benešov"),("529311","Bernartice")])).unwrap();
    pages.insert(BENESOV,detail_page("1\u{a0}000","800","790",&[("A","300"),("B","290"),("C","200")])).unwrap();
    pages.insert(BERNARTICE,detail_page("500","420","410",&[("A","150"),("B","140"),("C","120")])).unwrap();
    pages
}

fn layout() -> VolbyCzLayout { get_volby_layout_ps2017().unwrap() }

const EXPECTED_CSV : &str = "Code,Name,Voters,Envelopes,Valid,A,B,C\n529303,Benešov,1000,800,790,300,290,200\n529311,Bernartice,500,420,410,150,140,120\n";

#[test]
fn test_benesov() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let destination = dir.path().join("lau1_benesov.csv");
    let pages = benesov_pages();
    let table = run(&layout(),&pages,BENESOV_DISTRICT,&destination,&ExtractOptions::default())?;
    assert_eq!(EXPECTED_CSV,std::fs::read_to_string(&destination)?);
    assert_eq!(8,table.header().len());
    for row in table.rows() { assert_eq!(table.header().len(),row.to_record().len()); }
    assert_eq!(ElectoralCounters{registered_voters:1000,issued_envelopes:800,valid_votes:790},table.rows()[0].counters);
    assert_eq!(PartyVotes(vec![150,140,120]),table.rows()[1].votes);
    // every page fetched exactly once, list first.
    assert_eq!(vec![DISTRICT_LIST.to_string(),BENESOV_DISTRICT.to_string(),BENESOV.to_string(),BERNARTICE.to_string()],pages.requested());
    Ok(())
}

#[test]
fn test_same_pages_give_same_bytes() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    run(&layout(),&benesov_pages(),BENESOV_DISTRICT,&first,&ExtractOptions::default())?;
    run(&layout(),&benesov_pages(),BENESOV_DISTRICT,&second,&ExtractOptions::default())?;
    assert_eq!(std::fs::read(&first)?,std::fs::read(&second)?);
    Ok(())
}

#[test]
fn test_listing_order_is_kept() -> anyhow::Result<()> {
    let layout = layout();
    let html = Html::parse_document(&listing_page(&[("529311","Bernartice"),("529303","Benešov"),("532053","Zvěstov")]));
    let municipalities = layout.parse_listing(&html)?;
    let codes : Vec<MunicipalityCode> = municipalities.iter().map(|m|m.code).collect();
    assert_eq!(vec![MunicipalityCode(529311),MunicipalityCode(529303),MunicipalityCode(532053)],codes);
    assert_eq!("Bernartice",municipalities[0].name);
    assert_eq!(BERNARTICE,municipalities[0].detail_url.as_str());
    Ok(())
}

#[test]
fn test_district_list() -> anyhow::Result<()> {
    let layout = layout();
    let districts = layout.parse_district_list(&Html::parse_document(&district_list_page()))?;
    assert_eq!(2,districts.len());
    assert_eq!(BENESOV_DISTRICT,districts[0].as_str());
    Ok(())
}

#[test]
fn test_party_names_and_votes_in_table_order() -> anyhow::Result<()> {
    let layout = layout();
    let html = Html::parse_document(&detail_page("1\u{a0}234","1\u{a0}000","990",&[("Občanská demokratická strana","2\u{a0}577"),("ANO 2011","5\u{a0}321"),("Česká pirátská strana","1\u{a0}100"),("SPD","42"),("KSČM","0")]));
    assert_eq!(vec!["Občanská demokratická strana","ANO 2011","Česká pirátská strana","SPD","KSČM"],layout.parse_party_names(&html)?);
    assert_eq!(PartyVotes(vec![2577,5321,1100,42,0]),layout.parse_party_votes(&html)?);
    assert_eq!(ElectoralCounters{registered_voters:1234,issued_envelopes:1000,valid_votes:990},layout.parse_counters(&html)?);
    Ok(())
}

#[test]
fn test_unknown_district_fetches_only_the_list() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("out.csv");
    let pages = benesov_pages();
    let res = run(&layout(),&pages,"https://volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=9999",&destination,&ExtractOptions::default());
    assert!(matches!(res,Err(ScrapeError::InvalidSource { known_districts: 2, .. })));
    assert_eq!(vec![DISTRICT_LIST.to_string()],pages.requested());
    assert!(!destination.exists());
}

#[test]
fn test_not_a_url() {
    let pages = benesov_pages();
    let res = run(&layout(),&pages,"Benešov",Path::new("out.csv"),&ExtractOptions::default());
    match res {
        Err(e@ScrapeError::SourceNotAUrl { .. }) => assert_eq!("Benešov is not a url. Expecting a district page from https://volby.cz/pls/ps2017nss/ps3?xjazyk=CZ",e.to_string()),
        _ => panic!("Expected the source to be rejected as not a url"),
    }
    assert!(pages.requested().is_empty());
}

#[test]
fn test_bad_destination_fetches_nothing() {
    let pages = benesov_pages();
    let res = run(&layout(),&pages,BENESOV_DISTRICT,Path::new("lau1_benesov.xlsx"),&ExtractOptions::default());
    assert!(matches!(res,Err(ScrapeError::InvalidDestination(_))));
    assert!(pages.requested().is_empty());
}

#[test]
fn test_page_without_results_is_an_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let destination = dir.path().join("out.csv");
    let mut pages = benesov_pages();
    pages.insert(BERNARTICE,"<html><body><p>Výsledky nejsou k dispozici.</p></body></html>")?;
    match run(&layout(),&pages,BENESOV_DISTRICT,&destination,&ExtractOptions::default()) {
        Err(ScrapeError::StructuralMismatch { url, issue }) => {
            assert_eq!(BERNARTICE,url);
            assert_eq!(StructuralIssue::MissingElement("registered voters"),issue);
        }
        _ => panic!("Expected a structural mismatch"),
    }
    assert!(!destination.exists());
    Ok(())
}

#[test]
fn test_missing_party_row_is_an_error() -> anyhow::Result<()> {
    let mut pages = benesov_pages();
    pages.insert(BERNARTICE,detail_page("500","420","410",&[("A","150"),("B","140")]))?;
    let res = run(&layout(),&pages,BENESOV_DISTRICT,Path::new("never_written.csv"),&ExtractOptions::default());
    assert!(matches!(res,Err(ScrapeError::StructuralMismatch { issue: StructuralIssue::PartyCountMismatch { expected: 3, found: 2 }, .. })));
    Ok(())
}

#[test]
fn test_download_failure_propagates() {
    let mut pages = InMemoryPages::new();
    pages.insert(DISTRICT_LIST,district_list_page()).unwrap();
    let res = run(&layout(),&pages,BENESOV_DISTRICT,Path::new("never_written.csv"),&ExtractOptions::default());
    match res {
        Err(ScrapeError::TransportFailure { url, .. }) => assert_eq!(BENESOV_DISTRICT,url),
        _ => panic!("Expected a transport failure"),
    }
}
