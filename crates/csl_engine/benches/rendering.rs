/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use csl_core::{Date, Locale, Name, Reference};
use csl_engine::{CitationItem, Html, OutputFormat, Style};

const STYLE: &str = r#"<style page-range-format="chicago-16">
  <info><title>Author-Date Benchmark</title></info>
  <macro name="author">
    <names variable="author">
      <name and="text" name-as-sort-order="first" initialize-with=". " delimiter=", "/>
      <label form="short" prefix=" (" suffix=")"/>
      <substitute><names variable="editor"/><text variable="title"/></substitute>
    </names>
  </macro>
  <macro name="issued">
    <choose>
      <if variable="issued">
        <date variable="issued"><date-part name="year"/></date>
      </if>
      <else><text term="no date" form="short"/></else>
    </choose>
  </macro>
  <citation>
    <layout prefix="(" suffix=")" delimiter="; ">
      <group delimiter=" ">
        <names variable="author"><name form="short" and="symbol"/></names>
        <text macro="issued"/>
      </group>
    </layout>
  </citation>
  <bibliography>
    <layout suffix=".">
      <group delimiter=". ">
        <text macro="author"/>
        <text macro="issued"/>
        <text variable="title" font-style="italic"/>
        <group delimiter=", ">
          <text variable="container-title" font-style="italic"/>
          <number variable="volume"/>
          <text variable="page"/>
        </group>
      </group>
    </layout>
  </bibliography>
</style>"#;

fn bench_rendering(c: &mut Criterion) {
    let style = Style::from_xml(STYLE).expect("failed to compile benchmark style");
    let locale = Locale::en_us();

    let article = Reference::new("smith2019", "article-journal")
        .with_names(
            "author",
            vec![
                Name::new("Smith", "Jane Anne"),
                Name::new("Doe", "John"),
                Name::new("Roe", "Rick"),
            ],
        )
        .with_date("issued", Date::from_parts(&[2019, 5, 14]))
        .with_variable("title", "Rendering citations quickly")
        .with_variable("container-title", "Journal of Benchmarks")
        .with_variable("volume", "12")
        .with_variable("page", "1087-1089");
    let cites: Vec<(&Reference, Option<&CitationItem>)> = vec![(&article, None)];

    c.bench_function("compile style", |b| {
        b.iter(|| Style::from_xml(black_box(STYLE)).unwrap())
    });

    c.bench_function("render citation", |b| {
        b.iter(|| style.render_citation(black_box(&cites), &locale))
    });

    c.bench_function("render bibliography entry (html)", |b| {
        b.iter(|| Html.format(&style.render_bibliography_entry(black_box(&article), &locale)))
    });
}

criterion_group!(benches, bench_rendering);
criterion_main!(benches);
