//! Known HTML element kinds.
//!
//! Invariant: void kinds are declared first, so `is_void` is a single
//! discriminant comparison against `TagKind::Wbr`. The discriminant doubles as
//! the serialized category byte and must stay stable across releases.

macro_rules! tag_kinds {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Element kind recognized by the standard classifier.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum TagKind {
            $($variant,)*
            Custom,
        }

        impl TagKind {
            /// Every kind except `Custom`, in discriminant order.
            pub const KNOWN: &'static [TagKind] = &[$(TagKind::$variant,)*];

            /// Canonical uppercase name; `None` for `Custom`.
            pub fn name(self) -> Option<&'static str> {
                match self {
                    $(TagKind::$variant => Some($name),)*
                    TagKind::Custom => None,
                }
            }

            /// Look up a known kind by its uppercased name.
            pub fn from_name(name: &str) -> Option<TagKind> {
                match name {
                    $($name => Some(TagKind::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

tag_kinds! {
    Area => "AREA",
    Base => "BASE",
    Basefont => "BASEFONT",
    Bgsound => "BGSOUND",
    Br => "BR",
    Col => "COL",
    Command => "COMMAND",
    Embed => "EMBED",
    Frame => "FRAME",
    Hr => "HR",
    Image => "IMAGE",
    Img => "IMG",
    Input => "INPUT",
    Isindex => "ISINDEX",
    Keygen => "KEYGEN",
    Link => "LINK",
    Menuitem => "MENUITEM",
    Meta => "META",
    Nextid => "NEXTID",
    Param => "PARAM",
    Source => "SOURCE",
    Track => "TRACK",
    Wbr => "WBR",
    A => "A",
    Abbr => "ABBR",
    Address => "ADDRESS",
    Article => "ARTICLE",
    Aside => "ASIDE",
    Audio => "AUDIO",
    B => "B",
    Bdi => "BDI",
    Bdo => "BDO",
    Blockquote => "BLOCKQUOTE",
    Body => "BODY",
    Button => "BUTTON",
    Canvas => "CANVAS",
    Caption => "CAPTION",
    Cite => "CITE",
    Code => "CODE",
    Colgroup => "COLGROUP",
    Data => "DATA",
    Datalist => "DATALIST",
    Dd => "DD",
    Del => "DEL",
    Details => "DETAILS",
    Dfn => "DFN",
    Dialog => "DIALOG",
    Div => "DIV",
    Dl => "DL",
    Dt => "DT",
    Em => "EM",
    Fieldset => "FIELDSET",
    Figcaption => "FIGCAPTION",
    Figure => "FIGURE",
    Footer => "FOOTER",
    Form => "FORM",
    H1 => "H1",
    H2 => "H2",
    H3 => "H3",
    H4 => "H4",
    H5 => "H5",
    H6 => "H6",
    Head => "HEAD",
    Header => "HEADER",
    Hgroup => "HGROUP",
    Html => "HTML",
    I => "I",
    Iframe => "IFRAME",
    Ins => "INS",
    Kbd => "KBD",
    Label => "LABEL",
    Legend => "LEGEND",
    Li => "LI",
    Main => "MAIN",
    Map => "MAP",
    Mark => "MARK",
    Math => "MATH",
    Menu => "MENU",
    Meter => "METER",
    Nav => "NAV",
    Noscript => "NOSCRIPT",
    Object => "OBJECT",
    Ol => "OL",
    Optgroup => "OPTGROUP",
    Option => "OPTION",
    Output => "OUTPUT",
    P => "P",
    Picture => "PICTURE",
    Pre => "PRE",
    Progress => "PROGRESS",
    Q => "Q",
    Rb => "RB",
    Rp => "RP",
    Rt => "RT",
    Rtc => "RTC",
    Ruby => "RUBY",
    S => "S",
    Samp => "SAMP",
    Script => "SCRIPT",
    Section => "SECTION",
    Select => "SELECT",
    Slot => "SLOT",
    Small => "SMALL",
    Span => "SPAN",
    Strong => "STRONG",
    Style => "STYLE",
    Sub => "SUB",
    Summary => "SUMMARY",
    Sup => "SUP",
    Svg => "SVG",
    Table => "TABLE",
    Tbody => "TBODY",
    Td => "TD",
    Template => "TEMPLATE",
    Textarea => "TEXTAREA",
    Tfoot => "TFOOT",
    Th => "TH",
    Thead => "THEAD",
    Time => "TIME",
    Title => "TITLE",
    Tr => "TR",
    U => "U",
    Ul => "UL",
    Var => "VAR",
    Video => "VIDEO",
}

impl TagKind {
    pub fn is_void(self) -> bool {
        self <= TagKind::Wbr
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of `to_u8`; `None` for bytes outside the table.
    pub fn from_u8(byte: u8) -> Option<TagKind> {
        if byte == TagKind::Custom as u8 {
            return Some(TagKind::Custom);
        }
        TagKind::KNOWN.get(byte as usize).copied()
    }
}
