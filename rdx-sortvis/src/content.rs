//! Descriptions, reference snippets and interface strings shown next to the
//! animation.
//!
//! Purely presentational: nothing in the engine reads this module.

use crate::common::AlgorithmId;
use crate::error::SortvisError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Language of the interface labels. Snippet languages are unrelated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiLanguage {
    #[default]
    Vi,
    En,
}

impl UiLanguage {
    pub const ALL: [UiLanguage; 2] = [UiLanguage::Vi, UiLanguage::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            UiLanguage::Vi => "vi",
            UiLanguage::En => "en",
        }
    }

    /// Looks up a dotted key such as `"label.speed"`.
    pub fn text(&self, key: &str) -> Option<&'static str> {
        ui_text(*self, key)
    }

    /// Like `text`, but falls back to the key itself so a missing string stays visible.
    pub fn text_or_key<'a>(&self, key: &'a str) -> &'a str {
        self.text(key).unwrap_or(key)
    }
}

impl fmt::Display for UiLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for UiLanguage {
    type Err = SortvisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        UiLanguage::ALL
            .into_iter()
            .find(|language| language.as_str() == normalized)
            .ok_or_else(|| SortvisError::UnknownLanguage(s.to_string()))
    }
}

/// Interface string for `key` in `language`, or `None` for an unknown key.
pub fn ui_text(language: UiLanguage, key: &str) -> Option<&'static str> {
    let table = match language {
        UiLanguage::Vi => VI_STRINGS,
        UiLanguage::En => EN_STRINGS,
    };
    table
        .iter()
        .find(|(entry, _)| *entry == key)
        .map(|(_, text)| *text)
}

const VI_STRINGS: &[(&str, &str)] = &[
    ("logo", "DATN-2026"),
    ("nav.home", "Trang chủ"),
    ("nav.video", "Học qua khóa học"),
    ("nav.upload", "Luyện tập"),
    ("nav.ai", "AI chấm bài"),
    ("nav.login", "Đăng nhập"),
    ("label.elements", "SỐ PHẦN TỬ"),
    ("label.algorithm", "THUẬT TOÁN"),
    ("label.speed", "TỐC ĐỘ"),
    ("label.visual", "HIỂN THỊ"),
    ("btn.sort", "SẮP XẾP"),
    ("btn.random", "NGẪU NHIÊN"),
    ("section.desc", "Mô tả thuật toán"),
    ("section.code", "Cài đặt mã nguồn"),
    ("section.editor", "Trình soạn thảo code"),
    ("desc.text", "Mô phỏng trực quan các thuật toán sắp xếp."),
    ("footer.subtitle", "Trình mô phỏng thuật toán sắp xếp trực quan"),
];

const EN_STRINGS: &[(&str, &str)] = &[
    ("logo", "DATN-2026"),
    ("nav.home", "Home"),
    ("nav.video", "Courses"),
    ("nav.upload", "Practice"),
    ("nav.ai", "AI Grading"),
    ("nav.login", "Login"),
    ("label.elements", "ELEMENTS"),
    ("label.algorithm", "ALGORITHM"),
    ("label.speed", "SPEED"),
    ("label.visual", "VISUALIZATION"),
    ("btn.sort", "SORT"),
    ("btn.random", "RANDOMIZE"),
    ("section.desc", "Algorithm Description"),
    ("section.code", "Code Implementations"),
    ("section.editor", "Code Editor"),
    ("desc.text", "Interactive visualization of sorting algorithms."),
    ("footer.subtitle", "Interactive Sorting Algorithm Visualizer"),
];

/// Text shown for one algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmDescription {
    pub algorithm: AlgorithmId,
    pub summary: &'static str,
    /// Complexity, e.g. "O(n²)".
    pub complexity: &'static str,
    pub stable: bool,
    /// `(language label, source)` pairs in display order.
    pub snippets: &'static [(&'static str, &'static str)],
}

impl AlgorithmDescription {
    /// Case-insensitive lookup of a snippet by language label.
    pub fn snippet(&self, language: &str) -> Option<&'static str> {
        self.snippets
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(language.trim()))
            .map(|(_, source)| *source)
    }

    pub fn languages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.snippets.iter().map(|(label, _)| *label)
    }
}

pub fn describe(algorithm: AlgorithmId) -> AlgorithmDescription {
    match algorithm {
        AlgorithmId::Bubble => AlgorithmDescription {
            algorithm,
            summary: "Bubble Sort repeatedly steps through the list, compares adjacent \
                      elements and swaps them when they are out of order. Each pass \
                      carries the largest remaining value to the end, so passes repeat \
                      until the list is sorted.",
            complexity: "O(n²) worst and average case",
            stable: true,
            snippets: BUBBLE_SNIPPETS,
        },
        AlgorithmId::Selection => AlgorithmDescription {
            algorithm,
            summary: "Selection Sort splits the list into a sorted prefix and an unsorted \
                      suffix. It repeatedly scans the suffix for its smallest value and \
                      swaps it onto the end of the prefix.",
            complexity: "O(n²) in every case",
            stable: false,
            snippets: SELECTION_SNIPPETS,
        },
        AlgorithmId::Insertion => AlgorithmDescription {
            algorithm,
            summary: "Insertion Sort builds the sorted list one item at a time, shifting \
                      larger predecessors right until the new item fits. It is quick on \
                      nearly sorted input but slow on large random lists.",
            complexity: "O(n²) worst case, O(n) on sorted input",
            stable: true,
            snippets: INSERTION_SNIPPETS,
        },
        AlgorithmId::Quick => AlgorithmDescription {
            algorithm,
            summary: "Quick Sort picks a pivot (here the last element of the range), \
                      partitions the other elements into those smaller and those not \
                      smaller than it, then sorts both sides recursively.",
            complexity: "O(n log n) average, O(n²) worst case",
            stable: false,
            snippets: QUICK_SNIPPETS,
        },
        AlgorithmId::Merge => AlgorithmDescription {
            algorithm,
            summary: "Merge Sort halves the list until each piece holds one element, then \
                      merges the pieces back in order. Ties are taken from the left half \
                      first, which keeps equal elements in their original order.",
            complexity: "O(n log n) in every case",
            stable: true,
            snippets: MERGE_SNIPPETS,
        },
    }
}

/// Shorthand for `describe(algorithm).snippet(language)`.
pub fn snippet(algorithm: AlgorithmId, language: &str) -> Option<&'static str> {
    describe(algorithm).snippet(language)
}

const BUBBLE_SNIPPETS: &[(&str, &str)] = &[
    (
        "C",
        r#"void bubbleSort(int arr[], int n) {
    for (int i = 0; i < n - 1; i++) {
        for (int j = 0; j < n - i - 1; j++) {
            if (arr[j] > arr[j + 1]) {
                int temp = arr[j];
                arr[j] = arr[j + 1];
                arr[j + 1] = temp;
            }
        }
    }
}"#,
    ),
    (
        "C#",
        r#"public static void BubbleSort(int[] arr) {
    int n = arr.Length;
    for (int i = 0; i < n - 1; i++) {
        for (int j = 0; j < n - i - 1; j++) {
            if (arr[j] > arr[j + 1]) {
                int temp = arr[j];
                arr[j] = arr[j + 1];
                arr[j + 1] = temp;
            }
        }
    }
}"#,
    ),
    (
        "Java",
        r#"public static void bubbleSort(int[] arr) {
    int n = arr.length;
    for (int i = 0; i < n - 1; i++) {
        for (int j = 0; j < n - i - 1; j++) {
            if (arr[j] > arr[j + 1]) {
                int temp = arr[j];
                arr[j] = arr[j + 1];
                arr[j + 1] = temp;
            }
        }
    }
}"#,
    ),
    (
        "Python",
        r#"def bubble_sort(arr):
    n = len(arr)
    for i in range(n - 1):
        for j in range(n - i - 1):
            if arr[j] > arr[j + 1]:
                arr[j], arr[j + 1] = arr[j + 1], arr[j]"#,
    ),
    (
        "JavaScript",
        r#"function bubbleSort(arr) {
    const n = arr.length;
    for (let i = 0; i < n - 1; i++) {
        for (let j = 0; j < n - i - 1; j++) {
            if (arr[j] > arr[j + 1]) {
                [arr[j], arr[j + 1]] = [arr[j + 1], arr[j]];
            }
        }
    }
}"#,
    ),
];

const SELECTION_SNIPPETS: &[(&str, &str)] = &[
    (
        "C",
        r#"void selectionSort(int arr[], int n) {
    for (int i = 0; i < n - 1; i++) {
        int min_idx = i;
        for (int j = i + 1; j < n; j++) {
            if (arr[j] < arr[min_idx]) {
                min_idx = j;
            }
        }
        int temp = arr[min_idx];
        arr[min_idx] = arr[i];
        arr[i] = temp;
    }
}"#,
    ),
    (
        "C#",
        r#"public static void SelectionSort(int[] arr) {
    int n = arr.Length;
    for (int i = 0; i < n - 1; i++) {
        int minIdx = i;
        for (int j = i + 1; j < n; j++) {
            if (arr[j] < arr[minIdx]) {
                minIdx = j;
            }
        }
        int temp = arr[minIdx];
        arr[minIdx] = arr[i];
        arr[i] = temp;
    }
}"#,
    ),
    (
        "Java",
        r#"public static void selectionSort(int[] arr) {
    int n = arr.length;
    for (int i = 0; i < n - 1; i++) {
        int minIdx = i;
        for (int j = i + 1; j < n; j++) {
            if (arr[j] < arr[minIdx]) {
                minIdx = j;
            }
        }
        int temp = arr[minIdx];
        arr[minIdx] = arr[i];
        arr[i] = temp;
    }
}"#,
    ),
    (
        "Python",
        r#"def selection_sort(arr):
    n = len(arr)
    for i in range(n - 1):
        min_idx = i
        for j in range(i + 1, n):
            if arr[j] < arr[min_idx]:
                min_idx = j
        arr[i], arr[min_idx] = arr[min_idx], arr[i]"#,
    ),
    (
        "JavaScript",
        r#"function selectionSort(arr) {
    const n = arr.length;
    for (let i = 0; i < n - 1; i++) {
        let minIdx = i;
        for (let j = i + 1; j < n; j++) {
            if (arr[j] < arr[minIdx]) {
                minIdx = j;
            }
        }
        [arr[i], arr[minIdx]] = [arr[minIdx], arr[i]];
    }
}"#,
    ),
];

const INSERTION_SNIPPETS: &[(&str, &str)] = &[
    (
        "C",
        r#"void insertionSort(int arr[], int n) {
    for (int i = 1; i < n; i++) {
        int key = arr[i];
        int j = i - 1;
        while (j >= 0 && arr[j] > key) {
            arr[j + 1] = arr[j];
            j--;
        }
        arr[j + 1] = key;
    }
}"#,
    ),
    (
        "C#",
        r#"public static void InsertionSort(int[] arr) {
    int n = arr.Length;
    for (int i = 1; i < n; i++) {
        int key = arr[i];
        int j = i - 1;
        while (j >= 0 && arr[j] > key) {
            arr[j + 1] = arr[j];
            j--;
        }
        arr[j + 1] = key;
    }
}"#,
    ),
    (
        "Java",
        r#"public static void insertionSort(int[] arr) {
    int n = arr.length;
    for (int i = 1; i < n; i++) {
        int key = arr[i];
        int j = i - 1;
        while (j >= 0 && arr[j] > key) {
            arr[j + 1] = arr[j];
            j--;
        }
        arr[j + 1] = key;
    }
}"#,
    ),
    (
        "Python",
        r#"def insertion_sort(arr):
    for i in range(1, len(arr)):
        key = arr[i]
        j = i - 1
        while j >= 0 and arr[j] > key:
            arr[j + 1] = arr[j]
            j -= 1
        arr[j + 1] = key"#,
    ),
    (
        "JavaScript",
        r#"function insertionSort(arr) {
    for (let i = 1; i < arr.length; i++) {
        const key = arr[i];
        let j = i - 1;
        while (j >= 0 && arr[j] > key) {
            arr[j + 1] = arr[j];
            j--;
        }
        arr[j + 1] = key;
    }
}"#,
    ),
];

const QUICK_SNIPPETS: &[(&str, &str)] = &[
    (
        "C",
        r#"int partition(int arr[], int low, int high) {
    int pivot = arr[high];
    int i = low - 1;
    for (int j = low; j < high; j++) {
        if (arr[j] < pivot) {
            i++;
            int temp = arr[i];
            arr[i] = arr[j];
            arr[j] = temp;
        }
    }
    int temp = arr[i + 1];
    arr[i + 1] = arr[high];
    arr[high] = temp;
    return i + 1;
}

void quickSort(int arr[], int low, int high) {
    if (low < high) {
        int pi = partition(arr, low, high);
        quickSort(arr, low, pi - 1);
        quickSort(arr, pi + 1, high);
    }
}"#,
    ),
    (
        "C#",
        r#"public static void QuickSort(int[] arr, int low, int high) {
    if (low < high) {
        int pi = Partition(arr, low, high);
        QuickSort(arr, low, pi - 1);
        QuickSort(arr, pi + 1, high);
    }
}

private static int Partition(int[] arr, int low, int high) {
    int pivot = arr[high];
    int i = low - 1;
    for (int j = low; j < high; j++) {
        if (arr[j] < pivot) {
            i++;
            int temp = arr[i];
            arr[i] = arr[j];
            arr[j] = temp;
        }
    }
    int temp2 = arr[i + 1];
    arr[i + 1] = arr[high];
    arr[high] = temp2;
    return i + 1;
}"#,
    ),
    (
        "Java",
        r#"public static void quickSort(int[] arr, int low, int high) {
    if (low < high) {
        int pi = partition(arr, low, high);
        quickSort(arr, low, pi - 1);
        quickSort(arr, pi + 1, high);
    }
}

private static int partition(int[] arr, int low, int high) {
    int pivot = arr[high];
    int i = low - 1;
    for (int j = low; j < high; j++) {
        if (arr[j] < pivot) {
            i++;
            int temp = arr[i];
            arr[i] = arr[j];
            arr[j] = temp;
        }
    }
    int temp = arr[i + 1];
    arr[i + 1] = arr[high];
    arr[high] = temp;
    return i + 1;
}"#,
    ),
    (
        "Python",
        r#"def partition(arr, low, high):
    pivot = arr[high]
    i = low - 1
    for j in range(low, high):
        if arr[j] < pivot:
            i += 1
            arr[i], arr[j] = arr[j], arr[i]
    arr[i + 1], arr[high] = arr[high], arr[i + 1]
    return i + 1

def quick_sort(arr, low, high):
    if low < high:
        pi = partition(arr, low, high)
        quick_sort(arr, low, pi - 1)
        quick_sort(arr, pi + 1, high)"#,
    ),
    (
        "JavaScript",
        r#"function partition(arr, low, high) {
    const pivot = arr[high];
    let i = low - 1;
    for (let j = low; j < high; j++) {
        if (arr[j] < pivot) {
            i++;
            [arr[i], arr[j]] = [arr[j], arr[i]];
        }
    }
    [arr[i + 1], arr[high]] = [arr[high], arr[i + 1]];
    return i + 1;
}

function quickSort(arr, low = 0, high = arr.length - 1) {
    if (low < high) {
        const pi = partition(arr, low, high);
        quickSort(arr, low, pi - 1);
        quickSort(arr, pi + 1, high);
    }
}"#,
    ),
];

const MERGE_SNIPPETS: &[(&str, &str)] = &[
    (
        "C",
        r#"void merge(int arr[], int l, int m, int r) {
    int n1 = m - l + 1;
    int n2 = r - m;
    int L[n1], R[n2];
    for (int i = 0; i < n1; i++) L[i] = arr[l + i];
    for (int j = 0; j < n2; j++) R[j] = arr[m + 1 + j];
    int i = 0, j = 0, k = l;
    while (i < n1 && j < n2) {
        if (L[i] <= R[j]) arr[k++] = L[i++];
        else arr[k++] = R[j++];
    }
    while (i < n1) arr[k++] = L[i++];
    while (j < n2) arr[k++] = R[j++];
}

void mergeSort(int arr[], int l, int r) {
    if (l < r) {
        int m = l + (r - l) / 2;
        mergeSort(arr, l, m);
        mergeSort(arr, m + 1, r);
        merge(arr, l, m, r);
    }
}"#,
    ),
    (
        "C#",
        r#"public static void MergeSort(int[] arr, int l, int r) {
    if (l < r) {
        int m = l + (r - l) / 2;
        MergeSort(arr, l, m);
        MergeSort(arr, m + 1, r);
        Merge(arr, l, m, r);
    }
}

private static void Merge(int[] arr, int l, int m, int r) {
    int n1 = m - l + 1;
    int n2 = r - m;
    int[] L = new int[n1];
    int[] R = new int[n2];
    Array.Copy(arr, l, L, 0, n1);
    Array.Copy(arr, m + 1, R, 0, n2);
    int i = 0, j = 0, k = l;
    while (i < n1 && j < n2) {
        if (L[i] <= R[j]) {
            arr[k] = L[i];
            i++;
        } else {
            arr[k] = R[j];
            j++;
        }
        k++;
    }
    while (i < n1) {
        arr[k] = L[i];
        i++;
        k++;
    }
    while (j < n2) {
        arr[k] = R[j];
        j++;
        k++;
    }
}"#,
    ),
    (
        "Java",
        r#"public static void mergeSort(int[] arr, int l, int r) {
    if (l < r) {
        int m = l + (r - l) / 2;
        mergeSort(arr, l, m);
        mergeSort(arr, m + 1, r);
        merge(arr, l, m, r);
    }
}

private static void merge(int[] arr, int l, int m, int r) {
    int n1 = m - l + 1;
    int n2 = r - m;
    int[] L = new int[n1];
    int[] R = new int[n2];
    System.arraycopy(arr, l, L, 0, n1);
    System.arraycopy(arr, m + 1, R, 0, n2);
    int i = 0, j = 0, k = l;
    while (i < n1 && j < n2) {
        if (L[i] <= R[j]) {
            arr[k] = L[i];
            i++;
        } else {
            arr[k] = R[j];
            j++;
        }
        k++;
    }
    while (i < n1) {
        arr[k] = L[i];
        i++;
        k++;
    }
    while (j < n2) {
        arr[k] = R[j];
        j++;
        k++;
    }
}"#,
    ),
    (
        "Python",
        r#"def merge_sort(arr):
    if len(arr) > 1:
        mid = len(arr) // 2
        left, right = arr[:mid], arr[mid:]
        merge_sort(left)
        merge_sort(right)
        i = j = k = 0
        while i < len(left) and j < len(right):
            if left[i] <= right[j]:
                arr[k] = left[i]
                i += 1
            else:
                arr[k] = right[j]
                j += 1
            k += 1
        while i < len(left):
            arr[k] = left[i]
            i += 1
            k += 1
        while j < len(right):
            arr[k] = right[j]
            j += 1
            k += 1"#,
    ),
    (
        "JavaScript",
        r#"function merge(left, right) {
    const result = [];
    let i = 0, j = 0;
    while (i < left.length && j < right.length) {
        if (left[i] <= right[j]) result.push(left[i++]);
        else result.push(right[j++]);
    }
    return result.concat(left.slice(i)).concat(right.slice(j));
}

function mergeSort(arr) {
    if (arr.length <= 1) return arr;
    const mid = Math.floor(arr.length / 2);
    return merge(mergeSort(arr.slice(0, mid)), mergeSort(arr.slice(mid)));
}"#,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_algorithm_has_a_description_and_five_snippets() {
        for algorithm in AlgorithmId::ALL {
            let description = describe(algorithm);
            assert_eq!(description.algorithm, algorithm);
            assert!(!description.summary.is_empty());
            assert_eq!(
                description.languages().collect::<Vec<_>>(),
                vec!["C", "C#", "Java", "Python", "JavaScript"]
            );
        }
    }

    #[test]
    fn snippet_lookup_ignores_case() {
        let description = describe(AlgorithmId::Quick);
        let source = description.snippet("python").expect("python snippet");
        assert!(source.contains("def quick_sort"));
        assert!(description.snippet("COBOL").is_none());
        assert_eq!(
            snippet(AlgorithmId::Quick, " JavaScript "),
            describe(AlgorithmId::Quick).snippet("javascript")
        );
        assert!(snippet(AlgorithmId::Merge, "c#")
            .expect("c# snippet")
            .contains("Array.Copy"));
        assert!(snippet(AlgorithmId::Merge, "java")
            .expect("java snippet")
            .contains("System.arraycopy"));
    }

    #[test]
    fn interface_strings_exist_in_both_languages() {
        assert_eq!(VI_STRINGS.len(), EN_STRINGS.len());
        for (key, _) in EN_STRINGS {
            assert!(ui_text(UiLanguage::Vi, key).is_some(), "missing vi string {key}");
        }
        assert_eq!(ui_text(UiLanguage::En, "btn.sort"), Some("SORT"));
        assert_eq!(UiLanguage::Vi.text("label.speed"), Some("TỐC ĐỘ"));
        assert_eq!(UiLanguage::En.text("label"), None);
        assert_eq!(UiLanguage::En.text_or_key("nav.nowhere"), "nav.nowhere");
    }

    #[test]
    fn interface_language_parses_and_defaults_to_vietnamese() {
        assert_eq!(UiLanguage::default(), UiLanguage::Vi);
        assert_eq!(" EN ".parse::<UiLanguage>().unwrap(), UiLanguage::En);
        assert_eq!(
            "fr".parse::<UiLanguage>(),
            Err(SortvisError::UnknownLanguage("fr".to_string()))
        );
    }

    #[test]
    fn only_merge_bubble_and_insertion_are_marked_stable() {
        let stable: Vec<AlgorithmId> = AlgorithmId::ALL
            .into_iter()
            .filter(|id| describe(*id).stable)
            .collect();
        assert_eq!(
            stable,
            vec![AlgorithmId::Bubble, AlgorithmId::Insertion, AlgorithmId::Merge]
        );
    }
}
