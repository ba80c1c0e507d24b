use std::fs;
use std::io;
use std::path::Path;

pub(crate) const CONFIG_SAMPLE: &str = r#"# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
template_dir = "res/templates"
public_dir = "res/public"
content_index = "res/content/index.json"

[site]
title = "My blog"
locale = "ko-KR"
# Posts on the home page before the "All posts" link shows up
max_display = 5
page_size = 5

[server]
address = "0.0.0.0"
port = 8001

[log]
level = "Info"
log_to_console = true

# Remove this section to turn comments off
[comments]
enabled = false
repo = "owner/blog"
repo_id = "R_xxxxxxxx"
category = "Announcements"
category_id = "DIC_xxxxxxxx"
mapping = "title"
theme = "light"
lang = "ko"
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, CONFIG_SAMPLE)
}
