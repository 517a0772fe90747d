//! Internationalization support for the preferences dialog.
//!
//! UI strings are resolved once per language into [`CachedTranslations`] so
//! the render loop never allocates for static text. Accelerator segments and
//! processing-module names are translated on registration.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum Language {
    /// English
    #[default]
    English,
    /// Simplified Chinese
    SimplifiedChinese,
    /// Traditional Chinese
    TraditionalChinese,
    /// Japanese
    Japanese,
}

impl Language {
    /// Returns all available languages.
    pub fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::SimplifiedChinese,
            Language::TraditionalChinese,
            Language::Japanese,
        ]
    }

    /// Returns the display name of the language.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::SimplifiedChinese => "简体中文",
            Language::TraditionalChinese => "繁體中文",
            Language::Japanese => "日本語",
        }
    }

    /// Locale code stored in `ui_last/gui_language`.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::SimplifiedChinese => "zh_CN",
            Language::TraditionalChinese => "zh_TW",
            Language::Japanese => "ja",
        }
    }

    /// Maps a locale such as `zh_TW.UTF-8` to a supported language.
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.split(['.', '@']).next().unwrap_or_default();
        match code {
            "zh_TW" | "zh_HK" | "zh_MO" | "zh-Hant" => Some(Language::TraditionalChinese),
            c if c.starts_with("zh") => Some(Language::SimplifiedChinese),
            c if c.starts_with("ja") => Some(Language::Japanese),
            c if c.starts_with("en") || c == "C" || c == "POSIX" => Some(Language::English),
            _ => None,
        }
    }

    /// Language of the environment (`LC_ALL`, `LC_MESSAGES`, `LANG`).
    pub fn system_default() -> Language {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .and_then(|value| Language::from_code(&value))
            .unwrap_or_default()
    }

    /// Language for a stored code; an empty code follows the system.
    pub fn resolve(code: &str) -> Language {
        if code.is_empty() {
            Language::system_default()
        } else {
            Language::from_code(code).unwrap_or_default()
        }
    }
}

/// Cached translations for high-performance rendering.
#[derive(Clone)]
pub struct CachedTranslations {
    language: Language,
    inner: Arc<TranslationCache>,
}

struct TranslationCache {
    dialog_title: String,
    tab_general: String,
    tab_shortcuts: String,
    tab_presets: String,
    interface_language: String,
    language_tooltip: String,
    needs_restart: String,
    theme_label: String,
    theme_tooltip: String,
    performance_label: String,
    system_font_label: String,
    font_size_label: String,
    dpi_label: String,
    dpi_tooltip: String,
    usercss_label: String,
    save_css_button: String,
    css_saved: String,
    reset_hint: String,
    shortcut_header: String,
    binding_header: String,
    search_hint: String,
    shortcuts_hint: String,
    import_button: String,
    export_button: String,
    restore_defaults_button: String,
    remap_prompt: String,
    conflict_title: String,
    conflict_message: String,
    restore_title: String,
    restore_message: String,
    shortcuts_imported: String,
    shortcuts_exported: String,
    shortcuts_restored: String,
    save_failed: String,
    preset_name_header: String,
    module_header: String,
    write_protect_header: String,
    auto_apply_header: String,
    model_header: String,
    maker_header: String,
    lens_header: String,
    iso_header: String,
    exposure_header: String,
    aperture_header: String,
    focal_length_header: String,
    edit_button: String,
    delete_button: String,
    delete_title: String,
    delete_message: String,
    write_protected: String,
    presets_imported: String,
    presets_exported: String,
    edit_preset_title: String,
    description_label: String,
    auto_apply_label: String,
    save_button: String,
    cancel_button: String,
    yes: String,
    no: String,
    close_button: String,
    error_title: String,
    error_close_button: String,
    import_dialog_title: String,
    export_dialog_title: String,
}

impl CachedTranslations {
    /// Creates a new cached translations instance for the specified language.
    pub fn new(lang: Language) -> Self {
        Self {
            language: lang,
            inner: Arc::new(TranslationCache::new(lang)),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn dialog_title(&self) -> &str {
        &self.inner.dialog_title
    }
    pub fn tab_general(&self) -> &str {
        &self.inner.tab_general
    }
    pub fn tab_shortcuts(&self) -> &str {
        &self.inner.tab_shortcuts
    }
    pub fn tab_presets(&self) -> &str {
        &self.inner.tab_presets
    }

    // General tab
    pub fn interface_language(&self) -> &str {
        &self.inner.interface_language
    }
    pub fn language_tooltip(&self) -> &str {
        &self.inner.language_tooltip
    }
    pub fn needs_restart(&self) -> &str {
        &self.inner.needs_restart
    }
    pub fn theme_label(&self) -> &str {
        &self.inner.theme_label
    }
    pub fn theme_tooltip(&self) -> &str {
        &self.inner.theme_tooltip
    }
    pub fn performance_label(&self) -> &str {
        &self.inner.performance_label
    }
    pub fn system_font_label(&self) -> &str {
        &self.inner.system_font_label
    }
    pub fn font_size_label(&self) -> &str {
        &self.inner.font_size_label
    }
    pub fn dpi_label(&self) -> &str {
        &self.inner.dpi_label
    }
    pub fn dpi_tooltip(&self) -> &str {
        &self.inner.dpi_tooltip
    }
    pub fn usercss_label(&self) -> &str {
        &self.inner.usercss_label
    }
    pub fn save_css_button(&self) -> &str {
        &self.inner.save_css_button
    }
    pub fn css_saved(&self) -> &str {
        &self.inner.css_saved
    }

    // Shortcuts tab
    pub fn shortcut_header(&self) -> &str {
        &self.inner.shortcut_header
    }
    pub fn binding_header(&self) -> &str {
        &self.inner.binding_header
    }
    pub fn search_hint(&self) -> &str {
        &self.inner.search_hint
    }
    pub fn shortcuts_hint(&self) -> &str {
        &self.inner.shortcuts_hint
    }
    pub fn import_button(&self) -> &str {
        &self.inner.import_button
    }
    pub fn export_button(&self) -> &str {
        &self.inner.export_button
    }
    pub fn restore_defaults_button(&self) -> &str {
        &self.inner.restore_defaults_button
    }
    pub fn remap_prompt(&self) -> &str {
        &self.inner.remap_prompt
    }
    pub fn conflict_title(&self) -> &str {
        &self.inner.conflict_title
    }
    pub fn restore_title(&self) -> &str {
        &self.inner.restore_title
    }
    pub fn restore_message(&self) -> &str {
        &self.inner.restore_message
    }
    pub fn shortcuts_imported(&self) -> &str {
        &self.inner.shortcuts_imported
    }
    pub fn shortcuts_exported(&self) -> &str {
        &self.inner.shortcuts_exported
    }
    pub fn shortcuts_restored(&self) -> &str {
        &self.inner.shortcuts_restored
    }

    // Presets tab
    pub fn preset_name_header(&self) -> &str {
        &self.inner.preset_name_header
    }
    pub fn module_header(&self) -> &str {
        &self.inner.module_header
    }
    pub fn write_protect_header(&self) -> &str {
        &self.inner.write_protect_header
    }
    pub fn auto_apply_header(&self) -> &str {
        &self.inner.auto_apply_header
    }
    pub fn model_header(&self) -> &str {
        &self.inner.model_header
    }
    pub fn maker_header(&self) -> &str {
        &self.inner.maker_header
    }
    pub fn lens_header(&self) -> &str {
        &self.inner.lens_header
    }
    pub fn iso_header(&self) -> &str {
        &self.inner.iso_header
    }
    pub fn exposure_header(&self) -> &str {
        &self.inner.exposure_header
    }
    pub fn aperture_header(&self) -> &str {
        &self.inner.aperture_header
    }
    pub fn focal_length_header(&self) -> &str {
        &self.inner.focal_length_header
    }
    pub fn edit_button(&self) -> &str {
        &self.inner.edit_button
    }
    pub fn delete_button(&self) -> &str {
        &self.inner.delete_button
    }
    pub fn delete_title(&self) -> &str {
        &self.inner.delete_title
    }
    pub fn write_protected(&self) -> &str {
        &self.inner.write_protected
    }
    pub fn edit_preset_title(&self) -> &str {
        &self.inner.edit_preset_title
    }
    pub fn description_label(&self) -> &str {
        &self.inner.description_label
    }
    pub fn auto_apply_label(&self) -> &str {
        &self.inner.auto_apply_label
    }
    pub fn save_button(&self) -> &str {
        &self.inner.save_button
    }
    pub fn cancel_button(&self) -> &str {
        &self.inner.cancel_button
    }

    // Common
    pub fn yes(&self) -> &str {
        &self.inner.yes
    }
    pub fn no(&self) -> &str {
        &self.inner.no
    }
    pub fn close_button(&self) -> &str {
        &self.inner.close_button
    }
    pub fn error_title(&self) -> &str {
        &self.inner.error_title
    }
    pub fn error_close_button(&self) -> &str {
        &self.inner.error_close_button
    }
    pub fn import_dialog_title(&self) -> &str {
        &self.inner.import_dialog_title
    }
    pub fn export_dialog_title(&self) -> &str {
        &self.inner.export_dialog_title
    }

    // Runtime values
    pub fn format_reset_hint(&self, default: &str) -> String {
        self.inner.reset_hint.replace("{default}", default)
    }

    pub fn format_conflict(&self, binding: &str, path: &str) -> String {
        self.inner
            .conflict_message
            .replace("{binding}", binding)
            .replace("{path}", path)
    }

    pub fn format_delete_preset(&self, name: &str) -> String {
        self.inner.delete_message.replace("{name}", name)
    }

    pub fn format_presets_imported(&self, count: usize) -> String {
        self.inner
            .presets_imported
            .replace("{count}", &count.to_string())
    }

    pub fn format_presets_exported(&self, count: usize) -> String {
        self.inner
            .presets_exported
            .replace("{count}", &count.to_string())
    }

    pub fn format_save_failed(&self, error: &str) -> String {
        self.inner.save_failed.replace("{error}", error)
    }

    /// Label of a language entry; the system language carries a `*`.
    pub fn format_language_entry(&self, lang: Language, system: Language) -> String {
        if lang == system {
            format!("{} *", lang.display_name())
        } else {
            lang.display_name().to_string()
        }
    }
}

impl TranslationCache {
    fn new(lang: Language) -> Self {
        let t = |key| get_raw_translation(lang, key).to_string();
        Self {
            dialog_title: t(RawKey::DialogTitle),
            tab_general: t(RawKey::TabGeneral),
            tab_shortcuts: t(RawKey::TabShortcuts),
            tab_presets: t(RawKey::TabPresets),

            // General tab
            interface_language: t(RawKey::InterfaceLanguage),
            language_tooltip: t(RawKey::LanguageTooltip),
            needs_restart: t(RawKey::NeedsRestart),
            theme_label: t(RawKey::Theme),
            theme_tooltip: t(RawKey::ThemeTooltip),
            performance_label: t(RawKey::Performance),
            system_font_label: t(RawKey::SystemFont),
            font_size_label: t(RawKey::FontSize),
            dpi_label: t(RawKey::Dpi),
            dpi_tooltip: t(RawKey::DpiTooltip),
            usercss_label: t(RawKey::UserCss),
            save_css_button: t(RawKey::SaveCss),
            css_saved: t(RawKey::CssSaved),
            reset_hint: t(RawKey::ResetHint),

            // Shortcuts tab
            shortcut_header: t(RawKey::ShortcutHeader),
            binding_header: t(RawKey::BindingHeader),
            search_hint: t(RawKey::SearchHint),
            shortcuts_hint: t(RawKey::ShortcutsHint),
            import_button: t(RawKey::Import),
            export_button: t(RawKey::Export),
            restore_defaults_button: t(RawKey::RestoreDefaults),
            remap_prompt: t(RawKey::RemapPrompt),
            conflict_title: t(RawKey::ConflictTitle),
            conflict_message: t(RawKey::ConflictMessage),
            restore_title: t(RawKey::RestoreTitle),
            restore_message: t(RawKey::RestoreMessage),
            shortcuts_imported: t(RawKey::ShortcutsImported),
            shortcuts_exported: t(RawKey::ShortcutsExported),
            shortcuts_restored: t(RawKey::ShortcutsRestored),
            save_failed: t(RawKey::SaveFailed),

            // Presets tab
            preset_name_header: t(RawKey::PresetName),
            module_header: t(RawKey::Module),
            write_protect_header: t(RawKey::WriteProtectHeader),
            auto_apply_header: t(RawKey::AutoApplyHeader),
            model_header: t(RawKey::Model),
            maker_header: t(RawKey::Maker),
            lens_header: t(RawKey::Lens),
            iso_header: "ISO".to_string(),
            exposure_header: t(RawKey::Exposure),
            aperture_header: t(RawKey::Aperture),
            focal_length_header: t(RawKey::FocalLength),
            edit_button: t(RawKey::Edit),
            delete_button: t(RawKey::Delete),
            delete_title: t(RawKey::DeleteTitle),
            delete_message: t(RawKey::DeleteMessage),
            write_protected: t(RawKey::WriteProtected),
            presets_imported: t(RawKey::PresetsImported),
            presets_exported: t(RawKey::PresetsExported),
            edit_preset_title: t(RawKey::EditPresetTitle),
            description_label: t(RawKey::Description),
            auto_apply_label: t(RawKey::AutoApply),
            save_button: t(RawKey::Save),
            cancel_button: t(RawKey::Cancel),

            // Common
            yes: t(RawKey::Yes),
            no: t(RawKey::No),
            close_button: t(RawKey::Close),
            error_title: t(RawKey::ErrorTitle),
            error_close_button: t(RawKey::Close),
            import_dialog_title: t(RawKey::ImportDialogTitle),
            export_dialog_title: t(RawKey::ExportDialogTitle),
        }
    }
}

/// Raw translation keys for efficient lookup.
#[derive(Debug, Clone, Copy)]
enum RawKey {
    DialogTitle,
    TabGeneral,
    TabShortcuts,
    TabPresets,
    InterfaceLanguage,
    LanguageTooltip,
    NeedsRestart,
    Theme,
    ThemeTooltip,
    Performance,
    SystemFont,
    FontSize,
    Dpi,
    DpiTooltip,
    UserCss,
    SaveCss,
    CssSaved,
    ResetHint,
    ShortcutHeader,
    BindingHeader,
    SearchHint,
    ShortcutsHint,
    Import,
    Export,
    RestoreDefaults,
    RemapPrompt,
    ConflictTitle,
    ConflictMessage,
    RestoreTitle,
    RestoreMessage,
    ShortcutsImported,
    ShortcutsExported,
    ShortcutsRestored,
    SaveFailed,
    PresetName,
    Module,
    WriteProtectHeader,
    AutoApplyHeader,
    Model,
    Maker,
    Lens,
    Exposure,
    Aperture,
    FocalLength,
    Edit,
    Delete,
    DeleteTitle,
    DeleteMessage,
    WriteProtected,
    PresetsImported,
    PresetsExported,
    EditPresetTitle,
    Description,
    AutoApply,
    Save,
    Cancel,
    Yes,
    No,
    Close,
    ErrorTitle,
    ImportDialogTitle,
    ExportDialogTitle,
}

/// Gets raw translation string for a given language and key.
fn get_raw_translation(lang: Language, key: RawKey) -> &'static str {
    use Language::{English as En, Japanese as Ja, SimplifiedChinese as Sc, TraditionalChinese as Tc};
    match (lang, key) {
        (En, RawKey::DialogTitle) => "Lumen preferences",
        (Sc, RawKey::DialogTitle) => "Lumen 首选项",
        (Tc, RawKey::DialogTitle) => "Lumen 偏好設定",
        (Ja, RawKey::DialogTitle) => "Lumen 環境設定",

        (En, RawKey::TabGeneral) => "general",
        (Sc, RawKey::TabGeneral) => "常规",
        (Tc, RawKey::TabGeneral) => "一般",
        (Ja, RawKey::TabGeneral) => "一般",

        (En, RawKey::TabShortcuts) => "shortcuts",
        (Sc, RawKey::TabShortcuts) => "快捷键",
        (Tc, RawKey::TabShortcuts) => "快捷鍵",
        (Ja, RawKey::TabShortcuts) => "ショートカット",

        (En, RawKey::TabPresets) => "presets",
        (Sc, RawKey::TabPresets) => "预设",
        (Tc, RawKey::TabPresets) => "預設集",
        (Ja, RawKey::TabPresets) => "プリセット",

        // General tab
        (En, RawKey::InterfaceLanguage) => "interface language",
        (Sc, RawKey::InterfaceLanguage) => "界面语言",
        (Tc, RawKey::InterfaceLanguage) => "介面語言",
        (Ja, RawKey::InterfaceLanguage) => "インターフェース言語",

        (En, RawKey::LanguageTooltip) => {
            "double-click to reset to the system language\n* marks the system language"
        }
        (Sc, RawKey::LanguageTooltip) => "双击恢复为系统语言\n* 表示系统语言",
        (Tc, RawKey::LanguageTooltip) => "按兩下還原為系統語言\n* 表示系統語言",
        (Ja, RawKey::LanguageTooltip) => "ダブルクリックでシステム言語に戻す\n* はシステム言語",

        (En, RawKey::NeedsRestart) => "needs a restart to apply changes",
        (Sc, RawKey::NeedsRestart) => "需要重新启动才能生效",
        (Tc, RawKey::NeedsRestart) => "需要重新啟動才能生效",
        (Ja, RawKey::NeedsRestart) => "変更を反映するには再起動が必要です",

        (En, RawKey::Theme) => "theme",
        (Sc, RawKey::Theme) => "主题",
        (Tc, RawKey::Theme) => "佈景主題",
        (Ja, RawKey::Theme) => "テーマ",

        (En, RawKey::ThemeTooltip) => "set the theme for the user interface",
        (Sc, RawKey::ThemeTooltip) => "设置用户界面的主题",
        (Tc, RawKey::ThemeTooltip) => "設定使用者介面的佈景主題",
        (Ja, RawKey::ThemeTooltip) => "ユーザーインターフェースのテーマを設定",

        (En, RawKey::Performance) => "prefer performance over quality",
        (Sc, RawKey::Performance) => "性能优先于质量",
        (Tc, RawKey::Performance) => "效能優先於品質",
        (Ja, RawKey::Performance) => "品質よりパフォーマンスを優先",

        (En, RawKey::SystemFont) => "use system font size",
        (Sc, RawKey::SystemFont) => "使用系统字体大小",
        (Tc, RawKey::SystemFont) => "使用系統字型大小",
        (Ja, RawKey::SystemFont) => "システムのフォントサイズを使用",

        (En, RawKey::FontSize) => "font size in points",
        (Sc, RawKey::FontSize) => "字号（磅）",
        (Tc, RawKey::FontSize) => "字型大小（點）",
        (Ja, RawKey::FontSize) => "フォントサイズ（ポイント）",

        (En, RawKey::Dpi) => "GUI controls and text DPI",
        (Sc, RawKey::Dpi) => "界面控件和文字 DPI",
        (Tc, RawKey::Dpi) => "介面控制項與文字 DPI",
        (Ja, RawKey::Dpi) => "GUI コントロールとテキストの DPI",

        (En, RawKey::DpiTooltip) => {
            "adjust the global GUI resolution to rescale controls, buttons, labels, etc.\n\
             increase for a magnified GUI, decrease to fit more content in the window.\n\
             set to -1 to use the system-defined global resolution."
        }
        (Sc, RawKey::DpiTooltip) => "调整界面整体分辨率以缩放控件。\n设为 -1 使用系统分辨率。",
        (Tc, RawKey::DpiTooltip) => "調整介面整體解析度以縮放控制項。\n設為 -1 使用系統解析度。",
        (Ja, RawKey::DpiTooltip) => {
            "GUI 全体の解像度を調整してコントロールを拡大縮小します。\n-1 でシステムの解像度を使用します。"
        }

        (En, RawKey::UserCss) => "modify selected theme with CSS tweaks below",
        (Sc, RawKey::UserCss) => "使用下方的 CSS 调整所选主题",
        (Tc, RawKey::UserCss) => "使用下方的 CSS 調整所選佈景主題",
        (Ja, RawKey::UserCss) => "下の CSS で選択中のテーマを調整",

        (En, RawKey::SaveCss) => "save CSS and apply",
        (Sc, RawKey::SaveCss) => "保存 CSS 并应用",
        (Tc, RawKey::SaveCss) => "儲存 CSS 並套用",
        (Ja, RawKey::SaveCss) => "CSS を保存して適用",

        (En, RawKey::CssSaved) => "CSS tweaks saved",
        (Sc, RawKey::CssSaved) => "CSS 调整已保存",
        (Tc, RawKey::CssSaved) => "CSS 調整已儲存",
        (Ja, RawKey::CssSaved) => "CSS の調整を保存しました",

        (En, RawKey::ResetHint) => "double-click to reset to `{default}'",
        (Sc, RawKey::ResetHint) => "双击恢复为 `{default}'",
        (Tc, RawKey::ResetHint) => "按兩下還原為 `{default}'",
        (Ja, RawKey::ResetHint) => "ダブルクリックで `{default}' に戻す",

        // Shortcuts tab
        (En, RawKey::ShortcutHeader) => "shortcut",
        (Sc, RawKey::ShortcutHeader) => "快捷键",
        (Tc, RawKey::ShortcutHeader) => "快捷鍵",
        (Ja, RawKey::ShortcutHeader) => "ショートカット",

        (En, RawKey::BindingHeader) => "binding",
        (Sc, RawKey::BindingHeader) => "按键",
        (Tc, RawKey::BindingHeader) => "按鍵",
        (Ja, RawKey::BindingHeader) => "割り当て",

        (En, RawKey::SearchHint) => "search (enter for next match)",
        (Sc, RawKey::SearchHint) => "搜索（回车查找下一个）",
        (Tc, RawKey::SearchHint) => "搜尋（Enter 尋找下一個）",
        (Ja, RawKey::SearchHint) => "検索（Enter で次を検索）",

        (En, RawKey::ShortcutsHint) => {
            "double-click a shortcut to change it, press backspace to remove it"
        }
        (Sc, RawKey::ShortcutsHint) => "双击快捷键进行修改，按退格键清除",
        (Tc, RawKey::ShortcutsHint) => "按兩下快捷鍵進行修改，按退格鍵清除",
        (Ja, RawKey::ShortcutsHint) => "ダブルクリックで変更、Backspace で削除",

        (En, RawKey::Import) => "import",
        (Sc, RawKey::Import) => "导入",
        (Tc, RawKey::Import) => "匯入",
        (Ja, RawKey::Import) => "インポート",

        (En, RawKey::Export) => "export",
        (Sc, RawKey::Export) => "导出",
        (Tc, RawKey::Export) => "匯出",
        (Ja, RawKey::Export) => "エクスポート",

        (En, RawKey::RestoreDefaults) => "restore defaults",
        (Sc, RawKey::RestoreDefaults) => "恢复默认",
        (Tc, RawKey::RestoreDefaults) => "還原預設值",
        (Ja, RawKey::RestoreDefaults) => "デフォルトに戻す",

        (En, RawKey::RemapPrompt) => "press key combination to remap...",
        (Sc, RawKey::RemapPrompt) => "请按下新的组合键…",
        (Tc, RawKey::RemapPrompt) => "請按下新的組合鍵…",
        (Ja, RawKey::RemapPrompt) => "新しいキーの組み合わせを押してください…",

        (En, RawKey::ConflictTitle) => "accel conflict",
        (Sc, RawKey::ConflictTitle) => "快捷键冲突",
        (Tc, RawKey::ConflictTitle) => "快捷鍵衝突",
        (Ja, RawKey::ConflictTitle) => "ショートカットの競合",

        (En, RawKey::ConflictMessage) => {
            "{binding} accel is already mapped to\n{path}.\ndo you want to replace it?"
        }
        (Sc, RawKey::ConflictMessage) => "{binding} 已分配给\n{path}。\n要替换吗？",
        (Tc, RawKey::ConflictMessage) => "{binding} 已指派給\n{path}。\n要取代嗎？",
        (Ja, RawKey::ConflictMessage) => "{binding} はすでに\n{path}\nに割り当てられています。置き換えますか？",

        (En, RawKey::RestoreTitle) => "restore default shortcuts",
        (Sc, RawKey::RestoreTitle) => "恢复默认快捷键",
        (Tc, RawKey::RestoreTitle) => "還原預設快捷鍵",
        (Ja, RawKey::RestoreTitle) => "デフォルトのショートカットに戻す",

        (En, RawKey::RestoreMessage) => {
            "are you sure you want to restore the default keybindings?\n\
             this will erase any modifications you have made."
        }
        (Sc, RawKey::RestoreMessage) => "确定要恢复默认快捷键吗？\n这将清除您所做的所有修改。",
        (Tc, RawKey::RestoreMessage) => "確定要還原預設快捷鍵嗎？\n這將清除您所做的所有修改。",
        (Ja, RawKey::RestoreMessage) => {
            "デフォルトのキー割り当てに戻しますか？\nこれまでの変更はすべて失われます。"
        }

        (En, RawKey::ShortcutsImported) => "keyboard shortcuts imported",
        (Sc, RawKey::ShortcutsImported) => "已导入键盘快捷键",
        (Tc, RawKey::ShortcutsImported) => "已匯入鍵盤快捷鍵",
        (Ja, RawKey::ShortcutsImported) => "キーボードショートカットをインポートしました",

        (En, RawKey::ShortcutsExported) => "keyboard shortcuts exported",
        (Sc, RawKey::ShortcutsExported) => "已导出键盘快捷键",
        (Tc, RawKey::ShortcutsExported) => "已匯出鍵盤快捷鍵",
        (Ja, RawKey::ShortcutsExported) => "キーボードショートカットをエクスポートしました",

        (En, RawKey::ShortcutsRestored) => "default shortcuts restored",
        (Sc, RawKey::ShortcutsRestored) => "已恢复默认快捷键",
        (Tc, RawKey::ShortcutsRestored) => "已還原預設快捷鍵",
        (Ja, RawKey::ShortcutsRestored) => "デフォルトのショートカットに戻しました",

        (En, RawKey::SaveFailed) => "could not save: {error}",
        (Sc, RawKey::SaveFailed) => "无法保存：{error}",
        (Tc, RawKey::SaveFailed) => "無法儲存：{error}",
        (Ja, RawKey::SaveFailed) => "保存できませんでした: {error}",

        // Presets tab
        (En, RawKey::PresetName) => "name",
        (Sc, RawKey::PresetName) => "名称",
        (Tc, RawKey::PresetName) => "名稱",
        (Ja, RawKey::PresetName) => "名前",

        (En, RawKey::Module) => "module",
        (Sc, RawKey::Module) => "模块",
        (Tc, RawKey::Module) => "模組",
        (Ja, RawKey::Module) => "モジュール",

        (En, RawKey::WriteProtectHeader) => "🔒",
        (Sc, RawKey::WriteProtectHeader) => "🔒",
        (Tc, RawKey::WriteProtectHeader) => "🔒",
        (Ja, RawKey::WriteProtectHeader) => "🔒",

        (En, RawKey::AutoApplyHeader) => "auto",
        (Sc, RawKey::AutoApplyHeader) => "自动",
        (Tc, RawKey::AutoApplyHeader) => "自動",
        (Ja, RawKey::AutoApplyHeader) => "自動",

        (En, RawKey::Model) => "model",
        (Sc, RawKey::Model) => "型号",
        (Tc, RawKey::Model) => "型號",
        (Ja, RawKey::Model) => "モデル",

        (En, RawKey::Maker) => "maker",
        (Sc, RawKey::Maker) => "制造商",
        (Tc, RawKey::Maker) => "製造商",
        (Ja, RawKey::Maker) => "メーカー",

        (En, RawKey::Lens) => "lens",
        (Sc, RawKey::Lens) => "镜头",
        (Tc, RawKey::Lens) => "鏡頭",
        (Ja, RawKey::Lens) => "レンズ",

        (En, RawKey::Exposure) => "exposure",
        (Sc, RawKey::Exposure) => "曝光",
        (Tc, RawKey::Exposure) => "曝光",
        (Ja, RawKey::Exposure) => "露出",

        (En, RawKey::Aperture) => "aperture",
        (Sc, RawKey::Aperture) => "光圈",
        (Tc, RawKey::Aperture) => "光圈",
        (Ja, RawKey::Aperture) => "絞り",

        (En, RawKey::FocalLength) => "focal length",
        (Sc, RawKey::FocalLength) => "焦距",
        (Tc, RawKey::FocalLength) => "焦距",
        (Ja, RawKey::FocalLength) => "焦点距離",

        (En, RawKey::Edit) => "edit...",
        (Sc, RawKey::Edit) => "编辑…",
        (Tc, RawKey::Edit) => "編輯…",
        (Ja, RawKey::Edit) => "編集…",

        (En, RawKey::Delete) => "delete",
        (Sc, RawKey::Delete) => "删除",
        (Tc, RawKey::Delete) => "刪除",
        (Ja, RawKey::Delete) => "削除",

        (En, RawKey::DeleteTitle) => "delete preset?",
        (Sc, RawKey::DeleteTitle) => "删除预设？",
        (Tc, RawKey::DeleteTitle) => "刪除預設集？",
        (Ja, RawKey::DeleteTitle) => "プリセットを削除しますか？",

        (En, RawKey::DeleteMessage) => "do you really want to delete the preset `{name}'?",
        (Sc, RawKey::DeleteMessage) => "确定要删除预设“{name}”吗？",
        (Tc, RawKey::DeleteMessage) => "確定要刪除預設集「{name}」嗎？",
        (Ja, RawKey::DeleteMessage) => "プリセット「{name}」を削除しますか？",

        (En, RawKey::WriteProtected) => "this preset is write protected",
        (Sc, RawKey::WriteProtected) => "此预设受写保护",
        (Tc, RawKey::WriteProtected) => "此預設集受寫入保護",
        (Ja, RawKey::WriteProtected) => "このプリセットは書き込み保護されています",

        (En, RawKey::PresetsImported) => "{count} presets imported",
        (Sc, RawKey::PresetsImported) => "已导入 {count} 个预设",
        (Tc, RawKey::PresetsImported) => "已匯入 {count} 個預設集",
        (Ja, RawKey::PresetsImported) => "{count} 件のプリセットをインポートしました",

        (En, RawKey::PresetsExported) => "{count} presets exported",
        (Sc, RawKey::PresetsExported) => "已导出 {count} 个预设",
        (Tc, RawKey::PresetsExported) => "已匯出 {count} 個預設集",
        (Ja, RawKey::PresetsExported) => "{count} 件のプリセットをエクスポートしました",

        (En, RawKey::EditPresetTitle) => "edit preset",
        (Sc, RawKey::EditPresetTitle) => "编辑预设",
        (Tc, RawKey::EditPresetTitle) => "編輯預設集",
        (Ja, RawKey::EditPresetTitle) => "プリセットを編集",

        (En, RawKey::Description) => "description",
        (Sc, RawKey::Description) => "描述",
        (Tc, RawKey::Description) => "描述",
        (Ja, RawKey::Description) => "説明",

        (En, RawKey::AutoApply) => "auto apply this preset to matching images",
        (Sc, RawKey::AutoApply) => "自动应用到匹配的图像",
        (Tc, RawKey::AutoApply) => "自動套用到符合的影像",
        (Ja, RawKey::AutoApply) => "一致する画像に自動適用",

        (En, RawKey::Save) => "save",
        (Sc, RawKey::Save) => "保存",
        (Tc, RawKey::Save) => "儲存",
        (Ja, RawKey::Save) => "保存",

        (En, RawKey::Cancel) => "cancel",
        (Sc, RawKey::Cancel) => "取消",
        (Tc, RawKey::Cancel) => "取消",
        (Ja, RawKey::Cancel) => "キャンセル",

        // Common
        (En, RawKey::Yes) => "yes",
        (Sc, RawKey::Yes) => "是",
        (Tc, RawKey::Yes) => "是",
        (Ja, RawKey::Yes) => "はい",

        (En, RawKey::No) => "no",
        (Sc, RawKey::No) => "否",
        (Tc, RawKey::No) => "否",
        (Ja, RawKey::No) => "いいえ",

        (En, RawKey::Close) => "close",
        (Sc, RawKey::Close) => "关闭",
        (Tc, RawKey::Close) => "關閉",
        (Ja, RawKey::Close) => "閉じる",

        (En, RawKey::ErrorTitle) => "Error",
        (Sc, RawKey::ErrorTitle) => "错误",
        (Tc, RawKey::ErrorTitle) => "錯誤",
        (Ja, RawKey::ErrorTitle) => "エラー",

        (En, RawKey::ImportDialogTitle) => "select file to import",
        (Sc, RawKey::ImportDialogTitle) => "选择要导入的文件",
        (Tc, RawKey::ImportDialogTitle) => "選擇要匯入的檔案",
        (Ja, RawKey::ImportDialogTitle) => "インポートするファイルを選択",

        (En, RawKey::ExportDialogTitle) => "select destination",
        (Sc, RawKey::ExportDialogTitle) => "选择保存位置",
        (Tc, RawKey::ExportDialogTitle) => "選擇儲存位置",
        (Ja, RawKey::ExportDialogTitle) => "保存先を選択",
    }
}

/// Localized label of one canonical accelerator segment. Unknown segments
/// are shown as they are.
pub fn accel_segment(lang: Language, segment: &str) -> String {
    use Language::{English as En, Japanese as Ja, SimplifiedChinese as Sc, TraditionalChinese as Tc};
    let label = match (lang, segment) {
        (En, "image operations") => "processing modules",
        (Sc, "image operations") => "处理模块",
        (Tc, "image operations") => "處理模組",
        (Ja, "image operations") => "処理モジュール",

        (En, "modules") => "utility modules",
        (Sc, "modules") => "工具模块",
        (Tc, "modules") => "工具模組",
        (Ja, "modules") => "ユーティリティモジュール",

        (Sc, "global") => "全局",
        (Tc, "global") => "全域",
        (Ja, "global") => "グローバル",

        (Sc, "views") => "视图",
        (Tc, "views") => "檢視",
        (Ja, "views") => "ビュー",

        (Sc, "darkroom") => "暗房",
        (Tc, "darkroom") => "暗房",
        (Ja, "darkroom") => "ダークルーム",

        (Sc, "lighttable") => "光桌",
        (Tc, "lighttable") => "光桌",
        (Ja, "lighttable") => "ライトテーブル",

        (Sc, "map") => "地图",
        (Tc, "map") => "地圖",
        (Ja, "map") => "マップ",

        (Sc, "print") => "打印",
        (Tc, "print") => "列印",
        (Ja, "print") => "印刷",

        (Sc, "tethering") => "联机拍摄",
        (Tc, "tethering") => "連線拍攝",
        (Ja, "tethering") => "テザー撮影",

        (Sc, "slideshow") => "幻灯片",
        (Tc, "slideshow") => "投影片",
        (Ja, "slideshow") => "スライドショー",

        (Sc, "preset") => "预设",
        (Tc, "preset") => "預設集",
        (Ja, "preset") => "プリセット",

        (Sc, "blending") | (Sc, "blend") => "混合",
        (Tc, "blending") | (Tc, "blend") => "混合",
        (Ja, "blending") | (Ja, "blend") => "ブレンド",

        (Sc, "show") => "显示",
        (Tc, "show") => "顯示",
        (Ja, "show") => "表示",

        (Sc, "quit") => "退出",
        (Tc, "quit") => "結束",
        (Ja, "quit") => "終了",

        (Sc, "reset") => "重置",
        (Tc, "reset") => "重設",
        (Ja, "reset") => "リセット",

        (Sc, "zoom in") => "放大",
        (Tc, "zoom in") => "放大",
        (Ja, "zoom in") => "拡大",

        (Sc, "zoom out") => "缩小",
        (Tc, "zoom out") => "縮小",
        (Ja, "zoom out") => "縮小",

        (Sc, "undo") => "撤销",
        (Tc, "undo") => "復原",
        (Ja, "undo") => "元に戻す",

        (Sc, "redo") => "重做",
        (Tc, "redo") => "重做",
        (Ja, "redo") => "やり直し",

        (Sc, "fullscreen") => "全屏",
        (Tc, "fullscreen") => "全螢幕",
        (Ja, "fullscreen") => "全画面",

        (Sc, "preferences") => "首选项",
        (Tc, "preferences") => "偏好設定",
        (Ja, "preferences") => "環境設定",

        (Sc, "select all") => "全选",
        (Tc, "select all") => "全選",
        (Ja, "select all") => "すべて選択",

        (Sc, "select none") => "全不选",
        (Tc, "select none") => "全不選",
        (Ja, "select none") => "選択解除",

        (Sc, "opacity") => "不透明度",
        (Tc, "opacity") => "不透明度",
        (Ja, "opacity") => "不透明度",

        (_, other) => other,
    };
    label.to_string()
}

/// Localized display name of a processing module.
pub fn module_name(lang: Language, op: &str) -> &str {
    use Language::{English as En, Japanese as Ja, SimplifiedChinese as Sc, TraditionalChinese as Tc};
    match (lang, op) {
        (En, "temperature") => "white balance",
        (Sc, "temperature") => "白平衡",
        (Tc, "temperature") => "白平衡",
        (Ja, "temperature") => "ホワイトバランス",

        (En, "colorin") => "input color profile",
        (Sc, "colorin") => "输入色彩配置",
        (Tc, "colorin") => "輸入色彩設定檔",
        (Ja, "colorin") => "入力カラープロファイル",

        (En, "sharpen") => "sharpen",
        (Sc, "sharpen") => "锐化",
        (Tc, "sharpen") => "銳利化",
        (Ja, "sharpen") => "シャープ",

        (Sc, "exposure") => "曝光",
        (Tc, "exposure") => "曝光",
        (Ja, "exposure") => "露出",

        (Sc, "crop") => "裁剪",
        (Tc, "crop") => "裁切",
        (Ja, "crop") => "切り抜き",

        (En, "denoiseprofile") => "denoise (profiled)",
        (Sc, "denoiseprofile") => "降噪（配置）",
        (Tc, "denoiseprofile") => "降噪（設定檔）",
        (Ja, "denoiseprofile") => "ノイズ除去（プロファイル）",

        (En, "lens") => "lens correction",
        (Sc, "lens") => "镜头校正",
        (Tc, "lens") => "鏡頭校正",
        (Ja, "lens") => "レンズ補正",

        (En, "flip") => "orientation",
        (Sc, "flip") => "方向",
        (Tc, "flip") => "方向",
        (Ja, "flip") => "向き",

        (Sc, "vignette") => "暗角",
        (Tc, "vignette") => "暗角",
        (Ja, "vignette") => "周辺減光",

        (En, "colorbalancergb") => "color balance rgb",
        (Sc, "colorbalancergb") => "RGB 色彩平衡",
        (Tc, "colorbalancergb") => "RGB 色彩平衡",
        (Ja, "colorbalancergb") => "RGB カラーバランス",

        (_, other) => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_default() {
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn test_language_all() {
        let all_languages = Language::all();
        assert_eq!(all_languages.len(), 4);
        assert_eq!(all_languages[0], Language::English);
        assert_eq!(all_languages[3], Language::Japanese);
    }

    #[test]
    fn test_language_codes() {
        for lang in Language::all() {
            assert_eq!(Language::from_code(lang.code()), Some(*lang));
        }
        assert_eq!(Language::from_code("zh_TW.UTF-8"), Some(Language::TraditionalChinese));
        assert_eq!(Language::from_code("zh_SG"), Some(Language::SimplifiedChinese));
        assert_eq!(Language::from_code("en_GB.UTF-8"), Some(Language::English));
        assert_eq!(Language::from_code("ja_JP"), Some(Language::Japanese));
        assert_eq!(Language::from_code("de_DE"), None);
        assert_eq!(Language::resolve("fr"), Language::English);
        assert_eq!(Language::resolve("ja"), Language::Japanese);
    }

    #[test]
    fn test_cached_translations_english() {
        let translations = CachedTranslations::new(Language::English);
        assert_eq!(translations.tab_shortcuts(), "shortcuts");
        assert_eq!(translations.remap_prompt(), "press key combination to remap...");
        assert_eq!(
            translations.format_conflict("Ctrl+E", "global/export"),
            "Ctrl+E accel is already mapped to\nglobal/export.\ndo you want to replace it?"
        );
        assert_eq!(
            translations.format_delete_preset("bright"),
            "do you really want to delete the preset `bright'?"
        );
        assert_eq!(translations.format_presets_imported(3), "3 presets imported");
    }

    #[test]
    fn test_system_language_is_starred() {
        let translations = CachedTranslations::new(Language::English);
        assert_eq!(
            translations.format_language_entry(Language::Japanese, Language::Japanese),
            "日本語 *"
        );
        assert_eq!(
            translations.format_language_entry(Language::English, Language::Japanese),
            "English"
        );
    }

    #[test]
    fn test_accel_segments() {
        assert_eq!(accel_segment(Language::English, "image operations"), "processing modules");
        assert_eq!(accel_segment(Language::English, "quit"), "quit");
        assert_eq!(accel_segment(Language::Japanese, "preset"), "プリセット");
        assert_eq!(module_name(Language::English, "temperature"), "white balance");
        assert_eq!(module_name(Language::English, "exposure"), "exposure");
    }

    #[test]
    fn test_all_translations_present() {
        for lang in Language::all() {
            let trans = CachedTranslations::new(*lang);
            assert!(!trans.dialog_title().is_empty(), "Missing dialog_title for {:?}", lang);
            assert!(!trans.remap_prompt().is_empty(), "Missing remap_prompt for {:?}", lang);
            assert!(
                trans.format_conflict("A", "B").contains('A'),
                "Broken conflict template for {:?}",
                lang
            );
            assert!(
                trans.format_delete_preset("xyz").contains("xyz"),
                "Broken delete template for {:?}",
                lang
            );
        }
    }
}
