//! Rich-text editor configuration.
//!
//! Serialized as-is for the editor widget, so field names follow the widget's
//! camelCase option names.

use serde::Serialize;

use crate::constants::EDITOR_UPLOAD_PATH;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaletteColor {
    pub color: &'static str,
    pub label: &'static str,
}

pub const CUSTOM_COLOR_PALETTE: [PaletteColor; 6] = [
    PaletteColor {
        color: "hsl(4, 90%, 58%)",
        label: "Red",
    },
    PaletteColor {
        color: "hsl(340, 82%, 52%)",
        label: "Pink",
    },
    PaletteColor {
        color: "hsl(291, 64%, 42%)",
        label: "Purple",
    },
    PaletteColor {
        color: "hsl(262, 52%, 47%)",
        label: "Deep Purple",
    },
    PaletteColor {
        color: "hsl(231, 48%, 48%)",
        label: "Indigo",
    },
    PaletteColor {
        color: "hsl(207, 90%, 54%)",
        label: "Blue",
    },
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    pub upload_url: String,
    pub configs: EditorProfiles,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditorProfiles {
    pub default: DefaultProfile,
    pub extends: ExtendedProfile,
    pub list: ListOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct DefaultProfile {
    pub toolbar: Toolbar,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toolbar {
    pub items: Vec<&'static str>,
    /// The widget reads this flag as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_not_group_when_full: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedProfile {
    pub block_toolbar: Vec<&'static str>,
    pub toolbar: Toolbar,
    pub image: ImageOptions,
    pub table: TableOptions,
    pub heading: HeadingOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageOptions {
    pub toolbar: Vec<&'static str>,
    pub styles: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    pub content_toolbar: Vec<&'static str>,
    pub table_properties: ColorProperties,
    pub table_cell_properties: ColorProperties,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorProperties {
    pub border_colors: Vec<PaletteColor>,
    pub background_colors: Vec<PaletteColor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadingOptions {
    pub options: Vec<HeadingOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadingOption {
    pub model: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<&'static str>,
    pub title: &'static str,
    #[serde(rename = "class")]
    pub class_name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListOptions {
    pub properties: ListProperties,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProperties {
    pub styles: &'static str,
    pub start_index: &'static str,
    pub reversed: &'static str,
}

fn palette() -> ColorProperties {
    ColorProperties {
        border_colors: CUSTOM_COLOR_PALETTE.to_vec(),
        background_colors: CUSTOM_COLOR_PALETTE.to_vec(),
    }
}

fn heading(
    model: &'static str,
    view: Option<&'static str>,
    title: &'static str,
) -> HeadingOption {
    HeadingOption {
        model,
        view,
        title,
        class_name: match model {
            "paragraph" => "ck-heading_paragraph",
            "heading1" => "ck-heading_heading1",
            "heading2" => "ck-heading_heading2",
            _ => "ck-heading_heading3",
        },
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self {
            upload_url: EDITOR_UPLOAD_PATH.to_string(),
            configs: EditorProfiles {
                default: DefaultProfile {
                    toolbar: Toolbar {
                        items: vec![
                            "heading",
                            "|",
                            "bold",
                            "italic",
                            "link",
                            "bulletedList",
                            "numberedList",
                            "blockQuote",
                            "imageUpload",
                        ],
                        should_not_group_when_full: None,
                    },
                },
                extends: ExtendedProfile {
                    block_toolbar: vec![
                        "paragraph",
                        "heading1",
                        "heading2",
                        "heading3",
                        "|",
                        "bulletedList",
                        "numberedList",
                        "|",
                        "blockQuote",
                    ],
                    toolbar: Toolbar {
                        items: vec![
                            "heading",
                            "|",
                            "outdent",
                            "indent",
                            "|",
                            "bold",
                            "italic",
                            "link",
                            "underline",
                            "strikethrough",
                            "code",
                            "subscript",
                            "superscript",
                            "highlight",
                            "|",
                            "codeBlock",
                            "sourceEditing",
                            "insertImage",
                            "bulletedList",
                            "numberedList",
                            "todoList",
                            "|",
                            "blockQuote",
                            "imageUpload",
                            "|",
                            "fontSize",
                            "fontFamily",
                            "fontColor",
                            "fontBackgroundColor",
                            "mediaEmbed",
                            "removeFormat",
                            "insertTable",
                        ],
                        should_not_group_when_full: Some("true"),
                    },
                    image: ImageOptions {
                        toolbar: vec![
                            "imageTextAlternative",
                            "|",
                            "imageStyle:alignLeft",
                            "imageStyle:alignRight",
                            "imageStyle:alignCenter",
                            "imageStyle:side",
                            "|",
                        ],
                        styles: vec!["full", "side", "alignLeft", "alignRight", "alignCenter"],
                    },
                    table: TableOptions {
                        content_toolbar: vec![
                            "tableColumn",
                            "tableRow",
                            "mergeTableCells",
                            "tableProperties",
                            "tableCellProperties",
                        ],
                        table_properties: palette(),
                        table_cell_properties: palette(),
                    },
                    heading: HeadingOptions {
                        options: vec![
                            heading("paragraph", None, "Paragraph"),
                            heading("heading1", Some("h1"), "Heading 1"),
                            heading("heading2", Some("h2"), "Heading 2"),
                            heading("heading3", Some("h3"), "Heading 3"),
                        ],
                    },
                },
                list: ListOptions {
                    properties: ListProperties {
                        styles: "true",
                        start_index: "true",
                        reversed: "true",
                    },
                },
            },
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_widget_option_names() {
        let value = serde_json::to_value(EditorConfig::new()).unwrap();
        assert_eq!(value["uploadUrl"], "/upload/");
        assert_eq!(
            value["configs"]["extends"]["toolbar"]["shouldNotGroupWhenFull"],
            "true"
        );
        assert!(value["configs"]["default"]["toolbar"]
            .get("shouldNotGroupWhenFull")
            .is_none());
        assert_eq!(value["configs"]["list"]["properties"]["startIndex"], "true");
    }

    #[test]
    fn heading_options_carry_css_classes() {
        let value = serde_json::to_value(EditorConfig::new()).unwrap();
        let options = &value["configs"]["extends"]["heading"]["options"];
        assert_eq!(
            options[0],
            json!({"model": "paragraph", "title": "Paragraph", "class": "ck-heading_paragraph"})
        );
        assert_eq!(options[3]["view"], "h3");
        assert_eq!(options[3]["class"], "ck-heading_heading3");
    }

    #[test]
    fn table_palettes_use_custom_colors() {
        let value = serde_json::to_value(EditorConfig::new()).unwrap();
        let colors = &value["configs"]["extends"]["table"]["tableCellProperties"]["borderColors"];
        assert_eq!(colors.as_array().unwrap().len(), 6);
        assert_eq!(colors[3], json!({"color": "hsl(262, 52%, 47%)", "label": "Deep Purple"}));
    }
}
