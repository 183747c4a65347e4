// templates/pages/home.rs

use crate::ingest::REQUIRED_COLUMNS;
use crate::spreadsheets::ExportMode;
use crate::templates::{card, desktop_layout};
use maud::{html, Markup, PreEscaped};

pub fn home_page(chunk_rows: usize) -> Markup {
    let modes = [
        ExportMode::Single,
        ExportMode::ByDetailId,
        ExportMode::ByRowCount(chunk_rows),
    ];

    desktop_layout(
        "Price Splitter",
        html! {
            main class="container" {
                h1 { "Daily price file generator" }
                p {
                    "Upload a period price file. The last date is excluded: "
                    code { "2022-12-01" } " to " code { "2022-12-31" } " gives 30 lines."
                }

                (card("Input", html! {
                    p { "Required columns: " code { (REQUIRED_COLUMNS.join(", ")) } }
                }))

                form id="convert-form" class="card" {
                    label for="file" { "Upload a file" }
                    input type="file" id="file" name="file" accept=".xlsx" required;

                    fieldset {
                        legend { "Select an option" }
                        @for mode in &modes {
                            label {
                                input type="radio" name="mode" value=(mode.key());
                                " " (mode.label())
                            }
                            br;
                        }
                    }

                    button type="submit" { "Download file" }
                }

                div id="preview-area" {}
            }
            script { (PreEscaped(UPLOAD_SCRIPT)) }
        },
    )
}

const UPLOAD_SCRIPT: &str = r#"
const form = document.getElementById('convert-form');
const fileInput = document.getElementById('file');
const preview = document.getElementById('preview-area');

function post(url) {
  return fetch(url, {
    method: 'POST',
    headers: { 'Content-Type': 'application/octet-stream' },
    body: fileInput.files[0],
  });
}

fileInput.addEventListener('change', async () => {
  if (!fileInput.files.length) return;
  const resp = await post('/preview');
  preview.innerHTML = await resp.text();
});

form.addEventListener('submit', async (event) => {
  event.preventDefault();
  const mode = form.querySelector('input[name="mode"]:checked');
  if (!mode) {
    preview.innerHTML = '<p class="notice" role="alert">Please select an option</p>';
    return;
  }
  const resp = await post('/convert?mode=' + encodeURIComponent(mode.value));
  if (!resp.ok) {
    preview.innerHTML = await resp.text();
    return;
  }
  const disposition = resp.headers.get('Content-Disposition') || '';
  const match = /filename="([^"]+)"/.exec(disposition);
  const link = document.createElement('a');
  link.href = URL.createObjectURL(await resp.blob());
  link.download = match ? match[1] : 'download';
  link.click();
  URL.revokeObjectURL(link.href);
});
"#;
