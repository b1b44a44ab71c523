//! Decompiler settings object.
//!
//! [`DecompilerSettings`] is the configuration value handed to the
//! decompiler engine: one boolean toggle per language feature or output
//! behavior, plus the nested [`FormattingOptions`] block.
//!
//! The toggles are declared once in the table at the bottom of this module.
//! The table generates the struct, its defaults and the typed accessor table
//! the schema registry is built from, so a toggle cannot exist in the struct
//! without also existing in the document.

mod formatting;

use crate::schema::SettingsField;

pub use formatting::{
    BraceStyle, EmptyLineFormatting, FormattingOptions, NewLinePlacement, OptionEnum,
    PropertyFormatting, UsingPlacement, Wrapping,
};
pub(crate) use formatting::formatting_fields;

macro_rules! decompiler_settings {
    (
        $(
            $category:literal {
                $(
                    $(#[$doc:meta])*
                    $field:ident => $name:literal = $default:expr,
                )*
            }
        )*
    ) => {
        /// Settings consumed by the decompiler engine.
        ///
        /// Every field is a boolean toggle except [`formatting`](Self::formatting).
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct DecompilerSettings {
            $(
                $(
                    $(#[$doc])*
                    pub $field: bool,
                )*
            )*
            /// Layout of the generated C# source
            pub formatting: FormattingOptions,
        }

        impl Default for DecompilerSettings {
            fn default() -> Self {
                Self {
                    $( $( $field: $default, )* )*
                    formatting: FormattingOptions::default(),
                }
            }
        }

        /// Accessor table for every toggle, in declaration order
        pub(crate) fn settings_fields() -> Vec<SettingsField> {
            vec![
                $(
                    $(
                        SettingsField::new(
                            $name,
                            $category,
                            |s| s.$field,
                            |s, value| s.$field = value,
                        ),
                    )*
                )*
            ]
        }
    };
}

decompiler_settings! {
    "C# 1.0 / VS .NET" {
        /// Decompile `decimal` constants as literals
        decimal_constants => "DecimalConstants" = true,
        /// Decompile fixed-size buffers
        fixed_buffers => "FixedBuffers" = true,
        /// Use `+` for string concatenation
        string_concat => "StringConcat" = true,
        /// Detect field-like events
        automatic_events => "AutomaticEvents" = true,
        /// Detect `using` statements
        using_statement => "UsingStatement" = true,
        /// Detect `foreach` statements
        for_each_statement => "ForEachStatement" = true,
        /// Detect `lock` statements
        lock_statement => "LockStatement" = true,
        /// Detect `switch` on strings
        switch_statement_on_string => "SwitchStatementOnString" = true,
        /// Keep sparse integer switches as `switch`
        sparse_integer_switch => "SparseIntegerSwitch" = true,
        /// Detect array initializers
        array_initializers => "ArrayInitializers" = true,
    }
    "C# 2.0 / VS 2005" {
        /// Decompile anonymous methods
        anonymous_methods => "AnonymousMethods" = true,
        /// Decompile enumerators to `yield return`
        yield_return => "YieldReturn" = true,
        /// Lift operators on nullable values
        lift_nullables => "LiftNullables" = true,
        /// Use implicit method group conversions
        use_implicit_method_group_conversion => "UseImplicitMethodGroupConversion" = true,
    }
    "C# 3.0 / VS 2008" {
        /// Decompile anonymous types
        anonymous_types => "AnonymousTypes" = true,
        /// Decompile expression trees
        expression_trees => "ExpressionTrees" = true,
        /// Detect auto-implemented properties
        automatic_properties => "AutomaticProperties" = true,
        /// Call extension methods with instance syntax
        extension_methods => "ExtensionMethods" = true,
        /// Decompile LINQ query expressions
        query_expressions => "QueryExpressions" = true,
        /// Detect object and collection initializers
        object_or_collection_initializers => "ObjectOrCollectionInitializers" = true,
        /// Use lambda syntax where possible
        use_lambda_syntax => "UseLambdaSyntax" = true,
    }
    "C# 4.0 / VS 2010" {
        /// Decompile `dynamic` operations
        dynamic => "Dynamic" = true,
        /// Use named arguments
        named_arguments => "NamedArguments" = true,
        /// Omit default values of optional arguments
        optional_arguments => "OptionalArguments" = true,
    }
    "C# 5.0 / VS 2012" {
        /// Decompile `async`/`await`
        async_await => "AsyncAwait" = true,
    }
    "C# 6.0 / VS 2015" {
        /// Allow `await` inside `catch` and `finally`
        await_in_catch_finally => "AwaitInCatchFinally" = true,
        /// Use the null-conditional operators
        null_propagation => "NullPropagation" = true,
        /// Detect getter-only auto properties
        getter_only_automatic_properties => "GetterOnlyAutomaticProperties" = true,
        /// Detect dictionary initializers
        dictionary_initializers => "DictionaryInitializers" = true,
        /// Allow extension `Add` methods in collection initializers
        extension_methods_in_collection_initializers => "ExtensionMethodsInCollectionInitializers" = true,
        /// Use string interpolation
        string_interpolation => "StringInterpolation" = true,
        /// Use expression bodies for calculated getter-only properties
        use_expression_body_for_calculated_getter_only_properties => "UseExpressionBodyForCalculatedGetterOnlyProperties" = true,
    }
    "C# 7.0 / VS 2017" {
        /// Use `out` variable declarations
        out_variables => "OutVariables" = true,
        /// Use discards
        discards => "Discards" = true,
        /// Use tuple type syntax
        tuple_types => "TupleTypes" = true,
        /// Use throw expressions
        throw_expressions => "ThrowExpressions" = true,
        /// Use implicit tuple conversions
        tuple_conversions => "TupleConversions" = true,
        /// Introduce local functions
        local_functions => "LocalFunctions" = true,
        /// Detect deconstruction
        deconstruction => "Deconstruction" = true,
        /// Use pattern matching
        pattern_matching => "PatternMatching" = true,
        /// Use `ref` locals to preserve evaluation order
        use_ref_locals_for_accurate_order_of_evaluation => "UseRefLocalsForAccurateOrderOfEvaluation" = true,
    }
    "C# 7.2 / VS 2017.4" {
        /// Introduce `ref` modifiers on structs
        introduce_ref_modifiers_on_structs => "IntroduceRefModifiersOnStructs" = true,
        /// Introduce `readonly` and `in` modifiers
        introduce_readonly_and_in_modifiers => "IntroduceReadonlyAndInModifiers" = true,
        /// Use `ref` extension methods
        ref_extension_methods => "RefExtensionMethods" = true,
        /// Use non-trailing named arguments
        non_trailing_named_arguments => "NonTrailingNamedArguments" = true,
        /// Introduce `private protected` accessibility
        introduce_private_protected_accessibility => "IntroducePrivateProtectedAccessibility" = true,
    }
    "C# 7.3 / VS 2017.7" {
        /// Introduce the `unmanaged` constraint
        introduce_unmanaged_constraint => "IntroduceUnmanagedConstraint" = true,
        /// Use `stackalloc` initializers
        stack_alloc_initializers => "StackAllocInitializers" = true,
        /// Use pattern-based `fixed` statements
        pattern_based_fixed_statement => "PatternBasedFixedStatement" = true,
        /// Use tuple comparisons
        tuple_comparisons => "TupleComparisons" = true,
    }
    "C# 8.0 / VS 2019" {
        /// Use nullable reference types
        nullable_reference_types => "NullableReferenceTypes" = true,
        /// Use `readonly` struct members
        read_only_methods => "ReadOnlyMethods" = true,
        /// Decompile async enumerators
        async_enumerator => "AsyncEnumerator" = true,
        /// Use `await using` and `await foreach`
        async_using_and_for_each_statement => "AsyncUsingAndForEachStatement" = true,
        /// Use `using` declarations
        using_declarations => "UsingDeclarations" = true,
        /// Use pattern-based `using` on ref structs
        use_enhanced_using => "UseEnhancedUsing" = true,
        /// Use switch expressions
        switch_expressions => "SwitchExpressions" = true,
        /// Use recursive patterns
        recursive_pattern_matching => "RecursivePatternMatching" = true,
        /// Introduce static local functions
        static_local_functions => "StaticLocalFunctions" = true,
        /// Use ranges and indices
        ranges => "Ranges" = true,
    }
    "C# 9.0 / VS 2019.8" {
        /// Use `nint` and `nuint`
        native_integers => "NativeIntegers" = true,
        /// Use covariant return types
        covariant_returns => "CovariantReturns" = true,
        /// Use `init` accessors
        init_accessors => "InitAccessors" = true,
        /// Decompile record classes
        record_classes => "RecordClasses" = true,
        /// Use `with` expressions
        with_expressions => "WithExpressions" = true,
        /// Use primary constructor syntax for records
        use_primary_constructor_syntax => "UsePrimaryConstructorSyntax" = true,
        /// Use function pointers
        function_pointers => "FunctionPointers" = true,
        /// Allow `GetEnumerator` extension methods in `foreach`
        for_each_with_get_enumerator_extension => "ForEachWithGetEnumeratorExtension" = true,
        /// Use `and`, `or` and `not` patterns
        pattern_combinators => "PatternCombinators" = true,
        /// Use relational patterns
        relational_patterns => "RelationalPatterns" = true,
    }
    "C# 10.0 / VS 2022" {
        /// Decompile record structs
        record_structs => "RecordStructs" = true,
        /// Use file-scoped namespaces
        file_scoped_namespaces => "FileScopedNamespaces" = true,
    }
    "C# 11.0 / VS 2022.4" {
        /// Treat `IntPtr` as `nint`
        numeric_int_ptr => "NumericIntPtr" = true,
        /// Use `scoped` modifiers
        scoped_ref => "ScopedRef" = true,
        /// Use `required` members
        required_members => "RequiredMembers" = true,
        /// Use UTF-8 string literals
        utf8_string_literals => "Utf8StringLiterals" = true,
        /// Use the `>>>` operator
        unsigned_right_shift => "UnsignedRightShift" = true,
        /// Use user-defined checked operators
        checked_operators => "CheckedOperators" = true,
    }
    "C# 12.0 / VS 2022.8" {
        /// Use primary constructors on classes and structs
        use_primary_constructor_syntax_for_non_record_types => "UsePrimaryConstructorSyntaxForNonRecordTypes" = true,
        /// Use inline arrays
        inline_arrays => "InlineArrays" = true,
        /// Use `ref readonly` parameters
        ref_read_only_parameters => "RefReadOnlyParameters" = true,
    }
    "Other" {
        /// Always emit braces around embedded statements
        always_use_braces => "AlwaysUseBraces" = true,
        /// Always cast targets of explicit interface implementation calls
        always_cast_targets_of_explicit_interface_implementation_calls => "AlwaysCastTargetsOfExplicitInterfaceImplementationCalls" = false,
        /// Always qualify member references
        always_qualify_member_references => "AlwaysQualifyMemberReferences" = false,
        /// Always show values of enum members
        always_show_enum_member_values => "AlwaysShowEnumMemberValues" = false,
        /// Always prefix type names with `global::`
        always_use_global => "AlwaysUseGlobal" = false,
        /// Load debug symbols when available
        use_debug_symbols => "UseDebugSymbols" = true,
        /// Emit XML documentation comments
        show_xml_documentation => "ShowXmlDocumentation" = true,
        /// Emit IL offsets and debug information
        show_debug_info => "ShowDebugInfo" = false,
        /// Use `++` and `--`
        introduce_increment_and_decrement => "IntroduceIncrementAndDecrement" = true,
        /// Inline assignments into expressions
        make_assignment_expressions => "MakeAssignmentExpressions" = true,
        /// Remove unreachable code
        remove_dead_code => "RemoveDeadCode" = false,
        /// Remove stores to unused locals
        remove_dead_stores => "RemoveDeadStores" = false,
        /// Load the whole assembly into memory
        load_in_memory => "LoadInMemory" = false,
        /// Fail when a referenced assembly cannot be resolved
        throw_on_assembly_resolve_errors => "ThrowOnAssemblyResolveErrors" = true,
        /// Apply Windows Runtime projections
        apply_windows_runtime_projections => "ApplyWindowsRuntimeProjections" = true,
        /// Load referenced assemblies automatically
        auto_load_assembly_references => "AutoLoadAssemblyReferences" = true,
        /// Split aggregates into locals aggressively
        aggressive_scalar_replacement_of_aggregates => "AggressiveScalarReplacementOfAggregates" = false,
        /// Inline locals aggressively
        aggressive_inlining => "AggressiveInlining" = false,
        /// Declare each local on its own line
        separate_local_variable_declarations => "SeparateLocalVariableDeclarations" = false,
        /// Sort custom attributes
        sort_custom_attributes => "SortCustomAttributes" = false,
        /// Expand member definitions in the output tree
        expand_member_definitions => "ExpandMemberDefinitions" = false,
        /// Expand `using` declarations in the output tree
        expand_using_declarations => "ExpandUsingDeclarations" = false,
        /// Fold braces in the output tree
        fold_braces => "FoldBraces" = false,
    }
    "ProjectExport" {
        /// Emit SDK-style project files
        use_sdk_style_project_format => "UseSdkStyleProjectFormat" = true,
        /// Place each namespace in a nested directory
        use_nested_directories_for_namespaces => "UseNestedDirectoriesForNamespaces" = false,
    }
    "VBSpecificOptions" {
        /// Assume array lengths fit into `int`
        assume_array_length_fits_into_int32 => "AssumeArrayLengthFitsIntoInt32" = true,
    }
}

impl DecompilerSettings {
    /// Creates settings with every toggle at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the formatting options
    pub fn with_formatting(mut self, formatting: FormattingOptions) -> Self {
        self.formatting = formatting;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_defaults() {
        let settings = DecompilerSettings::new();
        assert!(settings.show_xml_documentation);
        assert!(settings.pattern_matching);
        assert!(!settings.remove_dead_code);
        assert!(!settings.use_nested_directories_for_namespaces);
        assert_eq!(settings.formatting, FormattingOptions::default());
    }

    #[test]
    fn test_accessor_table_reads_and_writes_fields() {
        let fields = settings_fields();
        let field = fields
            .iter()
            .find(|f| f.name == "RemoveDeadCode")
            .expect("RemoveDeadCode is declared");
        assert_eq!(field.category, "Other");

        let mut settings = DecompilerSettings::default();
        assert!(!field.get(&settings));
        field.set(&mut settings, true);
        assert!(settings.remove_dead_code);
        assert!(field.get(&settings));
    }

    #[test]
    fn test_every_toggle_is_independent() {
        let fields = settings_fields();
        for field in &fields {
            let mut settings = DecompilerSettings::default();
            let before = field.get(&settings);
            field.set(&mut settings, !before);

            let changed = fields
                .iter()
                .filter(|other| other.get(&settings) != other.get(&DecompilerSettings::default()))
                .count();
            assert_eq!(changed, 1, "toggling {} changed other fields", field.name);
        }
    }

    #[test]
    fn test_toggle_names_are_unique() {
        let fields = settings_fields();
        let names: HashSet<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), fields.len());
        assert!(fields.len() > 90);
    }
}
