//! C# formatting options.
//!
//! The fields mirror the layout options of the ILSpy output visitor. Each
//! field carries its document name and scalar kind in the table below; the
//! table generates the struct, its defaults and the accessor table.

use crate::codec::{ScalarKind, ScalarValue};
use crate::schema::FormattingField;

/// An enumeration that is written to the settings document by variant name.
pub trait OptionEnum: Sized + Copy + 'static {
    /// Variant names in declaration order
    const VARIANTS: &'static [&'static str];

    /// Returns the variant name
    fn name(self) -> &'static str;

    /// Parses a variant name, case-sensitively
    fn from_name(name: &str) -> Option<Self>;
}

macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident, )+
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            const ALL: &'static [$name] = &[$( $name::$variant, )+];
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl OptionEnum for $name {
            const VARIANTS: &'static [&'static str] = &[$( stringify!($variant), )+];

            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant), )+
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                Self::VARIANTS
                    .iter()
                    .position(|variant| *variant == name)
                    .and_then(|index| Self::ALL.get(index).copied())
            }
        }
    };
}

option_enum! {
    /// Placement of opening braces
    BraceStyle {
        /// `{` at the end of the line, after a space
        EndOfLine,
        /// `{` at the end of the line, without a space
        EndOfLineWithoutSpace,
        /// `{` on its own line
        NextLine,
        /// `{` on its own line, indented one level
        NextLineShifted,
        /// `{` and body indented one level
        NextLineShifted2,
        /// `{` at the end of the line, closing brace indented
        BannerStyle,
    }
    default = NextLine;
}

option_enum! {
    /// Layout of simple property bodies
    PropertyFormatting {
        /// Keep on a single line
        SingleLine,
        /// Spread over multiple lines
        MultipleLines,
    }
    default = SingleLine;
}

option_enum! {
    /// Handling of indentation on empty lines
    EmptyLineFormatting {
        /// Leave empty lines untouched
        DoNotChange,
        /// Indent empty lines
        Indent,
        /// Strip indentation from empty lines
        DoNotIndent,
    }
    default = DoNotChange;
}

option_enum! {
    /// Placement of a keyword relative to the preceding closing brace
    NewLinePlacement {
        /// Keep whatever layout the tree has
        DoNotCare,
        /// Start a new line
        NewLine,
        /// Stay on the closing brace's line
        SameLine,
    }
    default = NewLine;
}

option_enum! {
    /// Wrapping of argument and initializer lists
    Wrapping {
        /// Keep whatever layout the tree has
        DoNotChange,
        /// Never wrap
        DoNotWrap,
        /// Put every element on its own line
        WrapAlways,
        /// Wrap only past the line length
        WrapIfTooLong,
    }
    default = DoNotChange;
}

option_enum! {
    /// Placement of `using` directives
    UsingPlacement {
        /// Before the first namespace
        TopOfFile,
        /// Inside each namespace
        InsideNamespace,
    }
    default = TopOfFile;
}

macro_rules! formatting_field {
    (Text, $ty:ty, $field:ident, $name:literal) => {
        FormattingField::new(
            $name,
            ScalarKind::Text,
            |o| ScalarValue::Text(o.$field.clone()),
            |o, value| {
                if let ScalarValue::Text(v) = value {
                    o.$field = v;
                }
            },
        )
    };
    (Enum, $ty:ty, $field:ident, $name:literal) => {
        FormattingField::new(
            $name,
            ScalarKind::Enum(<$ty as OptionEnum>::VARIANTS),
            |o| ScalarValue::Enum(o.$field.name()),
            |o, value| {
                if let Some(v) = value.as_enum().and_then(<$ty as OptionEnum>::from_name) {
                    o.$field = v;
                }
            },
        )
    };
    ($kind:ident, $ty:ty, $field:ident, $name:literal) => {
        FormattingField::new(
            $name,
            ScalarKind::$kind,
            |o| ScalarValue::$kind(o.$field),
            |o, value| {
                if let ScalarValue::$kind(v) = value {
                    o.$field = v;
                }
            },
        )
    };
}

macro_rules! formatting_options {
    (
        $(
            $(#[$doc:meta])*
            $field:ident: $ty:ty [$kind:ident] = $default:expr => $name:literal,
        )*
    ) => {
        /// Layout options for the generated C# source.
        #[derive(Debug, Clone, PartialEq, Eq)]
        #[allow(missing_docs)]
        pub struct FormattingOptions {
            $(
                $(#[$doc])*
                pub $field: $ty,
            )*
        }

        impl Default for FormattingOptions {
            fn default() -> Self {
                Self {
                    $( $field: $default, )*
                }
            }
        }

        /// Accessor table for every formatting option, in declaration order
        pub(crate) fn formatting_fields() -> Vec<FormattingField> {
            vec![
                $( formatting_field!($kind, $ty, $field, $name), )*
            ]
        }
    };
}

formatting_options! {
    /// Display name of the preset
    name: String [Text] = "Allman".to_string() => "Name",
    /// Whether these options are a built-in preset
    is_built_in: bool [Boolean] = true => "IsBuiltIn",
    /// One level of indentation
    indentation_string: String [Text] = "\t".to_string() => "IndentationString",

    indent_namespace_body: bool [Boolean] = true => "IndentNamespaceBody",
    indent_class_body: bool [Boolean] = true => "IndentClassBody",
    indent_interface_body: bool [Boolean] = true => "IndentInterfaceBody",
    indent_struct_body: bool [Boolean] = true => "IndentStructBody",
    indent_enum_body: bool [Boolean] = true => "IndentEnumBody",
    indent_method_body: bool [Boolean] = true => "IndentMethodBody",
    indent_property_body: bool [Boolean] = true => "IndentPropertyBody",
    indent_event_body: bool [Boolean] = true => "IndentEventBody",
    indent_blocks: bool [Boolean] = true => "IndentBlocks",
    indent_switch_body: bool [Boolean] = false => "IndentSwitchBody",
    indent_case_body: bool [Boolean] = true => "IndentCaseBody",
    indent_break_statements: bool [Boolean] = true => "IndentBreakStatements",
    align_embedded_statements: bool [Boolean] = true => "AlignEmbeddedStatements",
    align_else_in_if_statements: bool [Boolean] = false => "AlignElseInIfStatements",
    indent_preprocessor_directives: bool [Boolean] = true => "IndentPreprocessorDirectives",
    align_to_member_reference_dot: bool [Boolean] = false => "AlignToMemberReferenceDot",
    indent_blocks_inside_expressions: bool [Boolean] = false => "IndentBlocksInsideExpressions",

    auto_property_formatting: PropertyFormatting [Enum] = PropertyFormatting::SingleLine => "AutoPropertyFormatting",
    simple_property_formatting: PropertyFormatting [Enum] = PropertyFormatting::SingleLine => "SimplePropertyFormatting",
    empty_line_formatting: EmptyLineFormatting [Enum] = EmptyLineFormatting::DoNotChange => "EmptyLineFormatting",

    namespace_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "NamespaceBraceStyle",
    class_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "ClassBraceStyle",
    interface_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "InterfaceBraceStyle",
    struct_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "StructBraceStyle",
    enum_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "EnumBraceStyle",
    method_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "MethodBraceStyle",
    anonymous_method_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "AnonymousMethodBraceStyle",
    constructor_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "ConstructorBraceStyle",
    destructor_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "DestructorBraceStyle",
    property_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "PropertyBraceStyle",
    property_get_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "PropertyGetBraceStyle",
    property_set_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "PropertySetBraceStyle",
    simple_get_block_formatting: PropertyFormatting [Enum] = PropertyFormatting::SingleLine => "SimpleGetBlockFormatting",
    simple_set_block_formatting: PropertyFormatting [Enum] = PropertyFormatting::SingleLine => "SimpleSetBlockFormatting",
    event_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "EventBraceStyle",
    event_add_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "EventAddBraceStyle",
    event_remove_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "EventRemoveBraceStyle",
    allow_event_add_block_inline: bool [Boolean] = true => "AllowEventAddBlockInline",
    allow_event_remove_block_inline: bool [Boolean] = true => "AllowEventRemoveBlockInline",
    statement_brace_style: BraceStyle [Enum] = BraceStyle::NextLine => "StatementBraceStyle",
    allow_if_block_inline: bool [Boolean] = false => "AllowIfBlockInline",
    allow_one_lined_array_initializers: bool [Boolean] = true => "AllowOneLinedArrayInitializers",

    else_new_line_placement: NewLinePlacement [Enum] = NewLinePlacement::NewLine => "ElseNewLinePlacement",
    else_if_new_line_placement: NewLinePlacement [Enum] = NewLinePlacement::SameLine => "ElseIfNewLinePlacement",
    catch_new_line_placement: NewLinePlacement [Enum] = NewLinePlacement::NewLine => "CatchNewLinePlacement",
    finally_new_line_placement: NewLinePlacement [Enum] = NewLinePlacement::NewLine => "FinallyNewLinePlacement",
    while_new_line_placement: NewLinePlacement [Enum] = NewLinePlacement::NewLine => "WhileNewLinePlacement",
    embedded_statement_placement: NewLinePlacement [Enum] = NewLinePlacement::NewLine => "EmbeddedStatementPlacement",

    space_before_method_declaration_parentheses: bool [Boolean] = false => "SpaceBeforeMethodDeclarationParentheses",
    space_between_empty_method_declaration_parentheses: bool [Boolean] = false => "SpaceBetweenEmptyMethodDeclarationParentheses",
    space_before_method_declaration_parameter_comma: bool [Boolean] = false => "SpaceBeforeMethodDeclarationParameterComma",
    space_after_method_declaration_parameter_comma: bool [Boolean] = true => "SpaceAfterMethodDeclarationParameterComma",
    space_within_method_declaration_parentheses: bool [Boolean] = false => "SpaceWithinMethodDeclarationParentheses",
    space_before_method_call_parentheses: bool [Boolean] = false => "SpaceBeforeMethodCallParentheses",
    space_after_method_call_parameter_comma: bool [Boolean] = true => "SpaceAfterMethodCallParameterComma",
    space_within_method_call_parentheses: bool [Boolean] = false => "SpaceWithinMethodCallParentheses",
    space_before_if_parentheses: bool [Boolean] = true => "SpaceBeforeIfParentheses",
    space_before_while_parentheses: bool [Boolean] = true => "SpaceBeforeWhileParentheses",
    space_before_for_parentheses: bool [Boolean] = true => "SpaceBeforeForParentheses",
    space_before_foreach_parentheses: bool [Boolean] = true => "SpaceBeforeForeachParentheses",
    space_before_catch_parentheses: bool [Boolean] = true => "SpaceBeforeCatchParentheses",
    space_before_switch_parentheses: bool [Boolean] = true => "SpaceBeforeSwitchParentheses",
    space_before_lock_parentheses: bool [Boolean] = true => "SpaceBeforeLockParentheses",
    space_before_using_parentheses: bool [Boolean] = true => "SpaceBeforeUsingParentheses",
    space_around_assignment: bool [Boolean] = true => "SpaceAroundAssignment",
    space_around_logical_operator: bool [Boolean] = true => "SpaceAroundLogicalOperator",
    space_around_equality_operator: bool [Boolean] = true => "SpaceAroundEqualityOperator",
    space_around_relational_operator: bool [Boolean] = true => "SpaceAroundRelationalOperator",
    space_around_bitwise_operator: bool [Boolean] = true => "SpaceAroundBitwiseOperator",
    space_around_additive_operator: bool [Boolean] = true => "SpaceAroundAdditiveOperator",
    space_around_multiplicative_operator: bool [Boolean] = true => "SpaceAroundMultiplicativeOperator",
    space_around_shift_operator: bool [Boolean] = true => "SpaceAroundShiftOperator",
    space_around_null_coalescing_operator: bool [Boolean] = true => "SpaceAroundNullCoalescingOperator",
    spaces_within_parentheses: bool [Boolean] = false => "SpacesWithinParentheses",
    space_before_conditional_operator_condition: bool [Boolean] = true => "SpaceBeforeConditionalOperatorCondition",
    space_after_conditional_operator_condition: bool [Boolean] = true => "SpaceAfterConditionalOperatorCondition",
    space_before_conditional_operator_separator: bool [Boolean] = true => "SpaceBeforeConditionalOperatorSeparator",
    space_after_conditional_operator_separator: bool [Boolean] = true => "SpaceAfterConditionalOperatorSeparator",
    space_before_array_declaration_brackets: bool [Boolean] = false => "SpaceBeforeArrayDeclarationBrackets",
    space_after_typecast: bool [Boolean] = false => "SpaceAfterTypecast",
    space_before_semicolon: bool [Boolean] = false => "SpaceBeforeSemicolon",
    space_before_for_semicolon: bool [Boolean] = false => "SpaceBeforeForSemicolon",
    space_after_for_semicolon: bool [Boolean] = true => "SpaceAfterForSemicolon",
    space_in_named_argument_after_double_colon: bool [Boolean] = true => "SpaceInNamedArgumentAfterDoubleColon",

    blank_lines_before_usings: i32 [Int32] = 0 => "BlankLinesBeforeUsings",
    blank_lines_after_usings: i32 [Int32] = 1 => "BlankLinesAfterUsings",
    blank_lines_before_first_declaration: i32 [Int32] = 0 => "BlankLinesBeforeFirstDeclaration",
    blank_lines_between_types: i32 [Int32] = 1 => "BlankLinesBetweenTypes",
    blank_lines_between_fields: i32 [Int32] = 0 => "BlankLinesBetweenFields",
    blank_lines_between_event_fields: i32 [Int32] = 0 => "BlankLinesBetweenEventFields",
    blank_lines_between_members: i32 [Int32] = 1 => "BlankLinesBetweenMembers",
    blank_lines_around_region: i32 [Int32] = 1 => "BlankLinesAroundRegion",
    blank_lines_inside_region: i32 [Int32] = 1 => "BlankLinesInsideRegion",
    keep_comments_at_first_column: bool [Boolean] = true => "KeepCommentsAtFirstColumn",

    array_initializer_wrapping: Wrapping [Enum] = Wrapping::WrapIfTooLong => "ArrayInitializerWrapping",
    array_initializer_brace_style: BraceStyle [Enum] = BraceStyle::EndOfLine => "ArrayInitializerBraceStyle",
    chained_method_call_wrapping: Wrapping [Enum] = Wrapping::DoNotChange => "ChainedMethodCallWrapping",
    method_call_argument_wrapping: Wrapping [Enum] = Wrapping::DoNotChange => "MethodCallArgumentWrapping",
    new_line_after_method_call_open_parentheses: bool [Boolean] = true => "NewLineAfterMethodCallOpenParentheses",
    method_call_closing_parentheses_on_new_line: bool [Boolean] = true => "MethodCallClosingParenthesesOnNewLine",
    method_declaration_parameter_wrapping: Wrapping [Enum] = Wrapping::DoNotChange => "MethodDeclarationParameterWrapping",
    indexer_argument_wrapping: Wrapping [Enum] = Wrapping::DoNotChange => "IndexerArgumentWrapping",
    indexer_declaration_parameter_wrapping: Wrapping [Enum] = Wrapping::DoNotChange => "IndexerDeclarationParameterWrapping",
    using_placement: UsingPlacement [Enum] = UsingPlacement::TopOfFile => "UsingPlacement",
}
