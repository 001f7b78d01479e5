// tests/mock_generation_tests.rs
//! Integration tests for mock class generation
//!
//! Method-level tests check the rendered `MOCK_*` lines of a single class;
//! class-level tests check the complete output including namespaces and
//! template headers.


use mockgen::MockStyle;
use test_harness::{TestHarness, assert_eq_ignore_leading_whitespace};

// ============================================================================
// Legacy method rendering
// ============================================================================

fn assert_methods(source: &str, expected: &str) {
    let actual = TestHarness::new().method_source(source);
    assert_eq_ignore_leading_whitespace(expected, &actual);
}

#[test]
fn test_simple_method() {
    assert_methods(
        "class Foo {\n public:\n  virtual int Bar();\n};\n",
        "MOCK_METHOD0(Bar,\nint());",
    );
}

#[test]
fn test_conversion_operator_returns_its_type() {
    assert_methods(
        "class Foo {\n public:\n  virtual operator bool() const;\n};\n",
        "MOCK_CONST_METHOD0(operator bool,\nbool());",
    );
}

#[test]
fn test_unicode_parameter_name() {
    assert_methods(
        "class Foo {\n public:\n  virtual void F(int é);\n};\n",
        "MOCK_METHOD1(F,\nvoid(int é));",
    );
}

#[test]
fn test_simple_constructors_and_destructor() {
    let source = r#"
class Foo {
 public:
  Foo();
  Foo(int x);
  Foo(const Foo& f);
  Foo(Foo&& f);
  ~Foo();
  virtual int Bar() = 0;
};
"#;
    assert_methods(source, "MOCK_METHOD0(Bar,\nint());");
}

#[test]
fn test_virtual_destructor() {
    let source = r#"
class Foo {
 public:
  virtual ~Foo();
  virtual int Bar() = 0;
};
"#;
    assert_methods(source, "MOCK_METHOD0(Bar,\nint());");
}

#[test]
fn test_explicitly_defaulted_constructors_and_destructor() {
    let source = r#"
class Foo {
 public:
  Foo() = default;
  Foo(const Foo& f) = default;
  Foo(Foo&& f) = default;
  ~Foo() = default;
  virtual int Bar() = 0;
};
"#;
    assert_methods(source, "MOCK_METHOD0(Bar,\nint());");
}

#[test]
fn test_explicitly_deleted_constructors_and_destructor() {
    let source = r#"
class Foo {
 public:
  Foo() = delete;
  Foo(const Foo& f) = delete;
  Foo(Foo&& f) = delete;
  ~Foo() = delete;
  virtual int Bar() = 0;
};
"#;
    assert_methods(source, "MOCK_METHOD0(Bar,\nint());");
}

#[test]
fn test_simple_override_method() {
    assert_methods(
        "class Foo {\n public:\n  int Bar() override;\n};\n",
        "MOCK_METHOD0(Bar,\nint());",
    );
}

#[test]
fn test_simple_const_method() {
    assert_methods(
        "class Foo {\n public:\n  virtual void Bar(bool flag) const;\n};\n",
        "MOCK_CONST_METHOD1(Bar,\nvoid(bool flag));",
    );
}

#[test]
fn test_explicit_void() {
    assert_methods(
        "class Foo {\n public:\n  virtual int Bar(void);\n};\n",
        "MOCK_METHOD0(Bar,\nint(void));",
    );
}

#[test]
fn test_strange_newline_in_parameter() {
    assert_methods(
        "class Foo {\n public:\n  virtual void Bar(int\na) = 0;\n};\n",
        "MOCK_METHOD1(Bar,\nvoid(int a));",
    );
}

#[test]
fn test_default_parameters() {
    assert_methods(
        "class Foo {\n public:\n  virtual void Bar(int a, char c = 'x') = 0;\n};\n",
        "MOCK_METHOD2(Bar,\nvoid(int, char));",
    );
}

#[test]
fn test_multiple_default_parameters() {
    assert_methods(
        "class Foo {\n public:\n  virtual void Bar(int a = 42, char c = 'x') = 0;\n};\n",
        "MOCK_METHOD2(Bar,\nvoid(int, char));",
    );
}

#[test]
fn test_removes_comments_when_defaults_are_present() {
    let source = r#"
class Foo {
 public:
  virtual void Bar(int a = 42 /* a comment */,
                   char /* other comment */ c= 'x') = 0;
};
"#;
    assert_methods(source, "MOCK_METHOD2(Bar,\nvoid(int, char));");
}

#[test]
fn test_double_slash_comments_in_parameter_list_are_removed() {
    let source = r#"
class Foo {
 public:
  virtual void Bar(int a,  // inline comments should be elided.
                   int b   // inline comments should be elided.
                   ) const = 0;
};
"#;
    assert_methods(source, "MOCK_CONST_METHOD2(Bar,\nvoid(int a, int b));");
}

#[test]
fn test_c_style_comments_in_parameter_list_are_kept() {
    let source = r#"
class Foo {
 public:
  virtual const string& Bar(int /* keeper */, int b);
};
"#;
    assert_methods(
        source,
        "MOCK_METHOD2(Bar,\nconst string&(int /* keeper */, int b));",
    );
}

#[test]
fn test_args_of_template_types() {
    let source = r#"
class Foo {
 public:
  virtual int Bar(const vector<int>& v, map<int, string>* output);
};"#;
    assert_methods(
        source,
        "MOCK_METHOD2(Bar,\nint(const vector<int>& v, map<int, string>* output));",
    );
}

#[test]
fn test_return_type_with_one_template_arg() {
    let source = r#"
class Foo {
 public:
  virtual vector<int>* Bar(int n);
};"#;
    assert_methods(source, "MOCK_METHOD1(Bar,\nvector<int>*(int n));");
}

#[test]
fn test_return_type_with_many_template_args() {
    let source = r#"
class Foo {
 public:
  virtual map<int, string> Bar();
};"#;
    assert_methods(
        source,
        "// The following line won't really compile, as the return\n\
         // type has multiple template arguments.  To fix it, use a\n\
         // typedef for the return type.\n\
         MOCK_METHOD0(Bar,\nmap<int, string>());",
    );
}

#[test]
fn test_simple_method_in_templated_class() {
    let source = r#"
template<class T>
class Foo {
 public:
  virtual int Bar();
};
"#;
    assert_methods(source, "MOCK_METHOD0_T(Bar,\nint());");
}

#[test]
fn test_pointer_arg_without_names() {
    assert_methods(
        "class Foo {\n  virtual int Bar(C*);\n};\n",
        "MOCK_METHOD1(Bar,\nint(C*));",
    );
}

#[test]
fn test_reference_arg_without_names() {
    assert_methods(
        "class Foo {\n  virtual int Bar(C&);\n};\n",
        "MOCK_METHOD1(Bar,\nint(C&));",
    );
}

#[test]
fn test_array_arg_without_names() {
    assert_methods(
        "class Foo {\n  virtual int Bar(C[]);\n};\n",
        "MOCK_METHOD1(Bar,\nint(C[]));",
    );
}

#[test]
fn test_non_virtual_methods_are_skipped() {
    let source = r#"
class Foo {
 public:
  int Plain();
  static Foo* Create();
  virtual void Hook();
};
"#;
    assert_methods(source, "MOCK_METHOD0(Hook,\nvoid());");
}

// ============================================================================
// Legacy class rendering
// ============================================================================

fn assert_mocks(source: &str, expected: &str) {
    let actual = TestHarness::new().class_source(source, &[]);
    assert_eq_ignore_leading_whitespace(expected, &actual);
}

#[test]
fn test_namespaces() {
    let source = r#"
namespace Foo {
namespace Bar { class Forward; }
namespace Baz {

class Test {
 public:
  virtual void Foo();
};

}  // namespace Baz
}  // namespace Foo
"#;
    let expected = "namespace Foo {
namespace Baz {

class MockTest : public Test {
public:
MOCK_METHOD0(Foo,
void());
};

}  // namespace Baz
}  // namespace Foo
";
    assert_mocks(source, expected);
}

#[test]
fn test_class_with_storage_specifier_macro() {
    let source = r#"
class STORAGE_SPECIFIER Test {
 public:
  virtual void Foo();
};
"#;
    let expected = "class MockTest : public Test {
public:
MOCK_METHOD0(Foo,
void());
};
";
    assert_mocks(source, expected);
}

#[test]
fn test_templated_forward_declaration() {
    let source = r#"
template <class T> class Forward;  // Forward declaration should be ignored.
class Test {
 public:
  virtual void Foo();
};
"#;
    let expected = "class MockTest : public Test {
public:
MOCK_METHOD0(Foo,
void());
};
";
    assert_mocks(source, expected);
}

#[test]
fn test_templated_class() {
    let source = r#"
template <typename S, typename T>
class Test {
 public:
  virtual void Foo();
};
"#;
    let expected = "template <typename T0, typename T1>
class MockTest : public Test<T0, T1> {
public:
MOCK_METHOD0_T(Foo,
void());
};
";
    assert_mocks(source, expected);
}

#[test]
fn test_non_type_and_variadic_template_parameters() {
    let source = r#"
template <typename S, int N, typename... Rest>
class Test {
 public:
  virtual void Foo();
};
"#;
    let expected = "template <typename T0, int T1, typename... T2>
class MockTest : public Test<T0, T1, T2...> {
public:
MOCK_METHOD0_T(Foo,
void());
};
";
    assert_mocks(source, expected);
}

#[test]
fn test_template_in_a_template_typedef() {
    let source = r#"
class Test {
 public:
  typedef std::vector<std::list<int>> FooType;
  virtual void Bar(const FooType& test_arg);
};
"#;
    let expected = "class MockTest : public Test {
public:
MOCK_METHOD1(Bar,
void(const FooType& test_arg));
};
";
    assert_mocks(source, expected);
}

#[test]
fn test_template_in_a_template_typedef_with_comma() {
    let source = r#"
class Test {
 public:
  typedef std::function<void(
      const vector<std::list<int>>&, int> FooType;
  virtual void Bar(const FooType& test_arg);
};
"#;
    let expected = "class MockTest : public Test {
public:
MOCK_METHOD1(Bar,
void(const FooType& test_arg));
};
";
    assert_mocks(source, expected);
}

#[test]
fn test_enum_type() {
    let source = r#"
class Test {
 public:
  enum Bar {
    BAZ, QUX, QUUX, QUUUX
  };
  virtual void Foo();
};
"#;
    let expected = "class MockTest : public Test {
public:
MOCK_METHOD0(Foo,
void());
};
";
    assert_mocks(source, expected);
}

#[test]
fn test_enum_class_type() {
    let source = r#"
class Test {
 public:
  enum class Bar {
    BAZ, QUX, QUUX, QUUUX
  };
  virtual void Foo();
};
"#;
    let expected = "class MockTest : public Test {
public:
MOCK_METHOD0(Foo,
void());
};
";
    assert_mocks(source, expected);
}

#[test]
fn test_std_function() {
    let source = r#"
class Test {
 public:
  Test(std::function<int(std::string)> foo) : foo_(foo) {}

  virtual std::function<int(std::string)> foo();

 private:
  std::function<int(std::string)> foo_;
};
"#;
    let expected = "class MockTest : public Test {
public:
MOCK_METHOD0(foo,
std::function<int (std::string)>());
};
";
    assert_mocks(source, expected);
}

#[test]
fn test_only_requested_classes_are_rendered() {
    let source = "class A { virtual void F(); };\nclass B { virtual void G(); };\n";
    let generated = TestHarness::new().generate(source, &["B", "Missing"]);
    let text = generated.output.render();
    assert!(text.contains("class MockB : public B {"));
    assert!(!text.contains("MockA"));
    assert_eq!(generated.output.missing, vec!["Missing"]);
}

// ============================================================================
// Modern style
// ============================================================================

fn assert_modern(source: &str, expected: &str) {
    let actual = TestHarness::new()
        .with_style(MockStyle::Modern)
        .method_source(source);
    assert_eq_ignore_leading_whitespace(expected, &actual);
}

#[test]
fn test_modern_simple_method() {
    assert_modern(
        "class Foo {\n public:\n  virtual int Bar();\n};\n",
        "MOCK_METHOD(int, Bar, (), (override));",
    );
}

#[test]
fn test_modern_const_method_and_arguments() {
    assert_modern(
        "class Foo {\n public:\n  virtual void Bar(bool flag, int /* unused */) const;\n};\n",
        "MOCK_METHOD(void, Bar, (bool flag, int), (const, override));",
    );
}

#[test]
fn test_modern_explicit_void_and_defaults() {
    let source = r#"
class Foo {
 public:
  virtual int Bar(void);
  virtual void Baz(int a = 42, char c = 'x') = 0;
};
"#;
    assert_modern(
        source,
        "MOCK_METHOD(int, Bar, (), (override));\nMOCK_METHOD(void, Baz, (int a, char c), (override));",
    );
}

#[test]
fn test_modern_commas_are_parenthesized() {
    let source = r#"
class Foo {
 public:
  virtual map<int, string> Bar(std::pair<int, int> p, std::function<int(int, int)> f);
};
"#;
    assert_modern(
        source,
        "MOCK_METHOD((map<int, string>), Bar, ((std::pair<int, int> p), std::function<int(int, int)> f), (override));",
    );
}

#[test]
fn test_modern_noexcept() {
    assert_modern(
        "class Foo {\n public:\n  virtual void Bar() const noexcept;\n};\n",
        "MOCK_METHOD(void, Bar, (), (const, noexcept, override));",
    );
}

// ============================================================================
// Fixtures
// ============================================================================

#[test]
fn test_turtle_fixture() {
    let generated = TestHarness::new().generate_fixture("turtle.h", &[]);
    assert!(generated.diagnostics.is_empty());
    let expected = "class MockTurtle : public Turtle {
 public:
  MOCK_METHOD0(PenUp,
      void());
  MOCK_METHOD0(PenDown,
      void());
  MOCK_METHOD1(Forward,
      void(int distance));
  MOCK_METHOD1(Turn,
      void(int degrees));
  MOCK_METHOD2(GoTo,
      void(int x, int y));
  MOCK_CONST_METHOD0(GetX,
      int());
  MOCK_CONST_METHOD0(GetY,
      int());
};
";
    assert_eq!(generated.output.render(), expected);
}

#[test]
fn test_painter_fixture() {
    let generated = TestHarness::new().generate_fixture("painter.h", &[]);
    // Q_OBJECT and DISALLOW_COPY_AND_ASSIGN are skipped with a note each.
    assert_eq!(generated.diagnostics.len(), 2);
    let expected = "namespace graphics {
namespace canvas {

class MockCanvas : public Canvas {
 public:
  MOCK_METHOD3(Draw,
      bool(const std::string& shape, int x, int y));
  // The following line won't really compile, as the return
  // type has multiple template arguments.  To fix it, use a
  // typedef for the return type.
  MOCK_CONST_METHOD0(Stats,
      std::map<std::string, int>());
  MOCK_METHOD0(Clear,
      void());
  MOCK_METHOD2(OnResize,
      void(int w, int h));
};

}  // namespace canvas
}  // namespace graphics

namespace graphics {
namespace canvas {

template <typename T0, int T1>
class MockBuffer : public Buffer<T0, T1> {
 public:
  MOCK_CONST_METHOD2_T(At,
      Pixel(int x, int y));
};

}  // namespace canvas
}  // namespace graphics
";
    assert_eq!(generated.output.render(), expected);
}

#[test]
fn test_painter_fixture_modern() {
    let generated = TestHarness::new()
        .with_style(MockStyle::Modern)
        .generate_fixture("painter.h", &["Canvas"]);
    let text = generated.output.render();
    assert!(text.contains(
        "  MOCK_METHOD(bool, Draw, (const std::string& shape, int x, int y), (override));"
    ));
    assert!(text.contains("  MOCK_METHOD((std::map<std::string, int>), Stats, (), (const, override));"));
    assert!(text.contains("  MOCK_METHOD(void, Clear, (), (noexcept, override));"));
    assert!(!text.contains("MockBuffer"));
}

#[test]
fn test_header_without_definitions() {
    let generated = TestHarness::new().generate_fixture("empty.h", &[]);
    assert!(generated.output.lines.is_empty());
    assert!(generated.output.no_class_found);
}
